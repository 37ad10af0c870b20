//! One ball and its full outcome.
//!
//! A [`Delivery`] is appended to an innings exactly once and never mutated
//! afterwards. Runs for wides and no-balls include the automatic penalty run.

use super::format::ILLEGAL_BALL_PENALTY;
use super::MatchStatus;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtraType {
    #[default]
    None,
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraType {
    /// Wides and no-balls carry an automatic penalty run.
    pub fn has_penalty(&self) -> bool {
        matches!(self, ExtraType::Wide | ExtraType::NoBall)
    }

    /// Byes and leg-byes are never credited to the batter.
    pub fn is_bye(&self) -> bool {
        matches!(self, ExtraType::Bye | ExtraType::LegBye)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DismissalType {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
    Retired,
}

impl DismissalType {
    /// Whether the bowler is credited with the wicket.
    pub fn credits_bowler(&self) -> bool {
        !matches!(self, DismissalType::RunOut | DismissalType::Retired)
    }

    /// Scorecard description, e.g. "c Smith b Jones".
    pub fn describe(&self, bowler: Option<&str>, fielder: Option<&str>) -> String {
        let bowler = bowler.unwrap_or("?");
        match self {
            DismissalType::Bowled => format!("b {}", bowler),
            DismissalType::Caught => match fielder {
                Some(f) if f == bowler => format!("c & b {}", bowler),
                Some(f) => format!("c {} b {}", f, bowler),
                None => format!("c ? b {}", bowler),
            },
            DismissalType::Lbw => format!("lbw b {}", bowler),
            DismissalType::RunOut => match fielder {
                Some(f) => format!("run out ({})", f),
                None => "run out".to_string(),
            },
            DismissalType::Stumped => match fielder {
                Some(f) => format!("st {} b {}", f, bowler),
                None => format!("st ? b {}", bowler),
            },
            DismissalType::HitWicket => format!("hit wicket b {}", bowler),
            DismissalType::Retired => "retired out".to_string(),
        }
    }
}

/// State the engine saw immediately before a delivery was applied.
///
/// Stamped onto the delivery at append time so undo can put the crease,
/// the Indoor cycle and innings completion back exactly as they were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriorState {
    pub striker_id: Option<String>,
    pub non_striker_id: Option<String>,
    pub bowler_id: Option<String>,
    pub status: MatchStatus,
    pub indoor_outs_in_cycle: usize,
    /// Dismissal text the batter carried before this ball (wicket balls only)
    #[serde(default)]
    pub dismissal_before: Option<String>,
    /// Indoor batter re-batting after being out earlier in the cycle
    #[serde(default)]
    pub batter_was_out: bool,
    /// Players whose out flag was cleared by an Indoor cycle reset on this ball
    #[serde(default)]
    pub cycle_reset_ids: Vec<String>,
    /// This ball completed the first innings and appended the second
    #[serde(default)]
    pub appended_innings: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub runs: u32,
    pub is_legal: bool,
    pub is_wicket: bool,
    #[serde(default)]
    pub extra_type: ExtraType,
    #[serde(default)]
    pub dismissal_type: Option<DismissalType>,
    #[serde(default)]
    pub fielder_id: Option<String>,
    /// Filled in by the engine from the match's current bowler
    #[serde(default)]
    pub bowler_id: Option<String>,
    /// Filled in by the engine from the match's current striker
    #[serde(default)]
    pub batter_id: Option<String>,
    #[serde(default)]
    pub display: String,
    /// Forces (`Some(true)`) or suppresses (`Some(false)`) the run-parity swap
    #[serde(default)]
    pub rotation_override: Option<bool>,
    /// Indoor: ball hit the wall, 2 runs credited, strike rotates as for 1
    #[serde(default)]
    pub wall_bonus: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior: Option<PriorState>,
}

impl Default for Delivery {
    fn default() -> Self {
        Self::runs(0)
    }
}

impl Delivery {
    /// Runs off the bat from a legal ball.
    pub fn runs(runs: u32) -> Self {
        Self {
            runs,
            is_legal: true,
            is_wicket: false,
            extra_type: ExtraType::None,
            dismissal_type: None,
            fielder_id: None,
            bowler_id: None,
            batter_id: None,
            display: if runs == 0 { "•".to_string() } else { runs.to_string() },
            rotation_override: None,
            wall_bonus: false,
            prior: None,
        }
    }

    /// A wide plus `extra` runs taken (total = penalty + extra).
    pub fn wide(extra: u32) -> Self {
        let runs = ILLEGAL_BALL_PENALTY + extra;
        Self {
            runs,
            is_legal: false,
            extra_type: ExtraType::Wide,
            display: if extra == 0 { "Wd".to_string() } else { format!("{}Wd", runs) },
            ..Self::runs(0)
        }
    }

    /// A no-ball plus `bat_runs` scored off it.
    pub fn no_ball(bat_runs: u32) -> Self {
        let runs = ILLEGAL_BALL_PENALTY + bat_runs;
        Self {
            runs,
            is_legal: false,
            extra_type: ExtraType::NoBall,
            display: if bat_runs == 0 { "Nb".to_string() } else { format!("{}Nb", runs) },
            ..Self::runs(0)
        }
    }

    pub fn bye(runs: u32) -> Self {
        Self {
            runs,
            extra_type: ExtraType::Bye,
            display: format!("{}B", runs),
            ..Self::runs(0)
        }
    }

    pub fn leg_bye(runs: u32) -> Self {
        Self {
            runs,
            extra_type: ExtraType::LegBye,
            display: format!("{}LB", runs),
            ..Self::runs(0)
        }
    }

    /// A legal ball on which the striker is dismissed and no runs are scored.
    pub fn wicket(kind: DismissalType) -> Self {
        Self {
            is_wicket: true,
            dismissal_type: Some(kind),
            display: "W".to_string(),
            ..Self::runs(0)
        }
    }

    /// Indoor wall bonus: 2 runs credited, rotation as for a single.
    pub fn wall_bonus() -> Self {
        Self { wall_bonus: true, display: "2WB".to_string(), ..Self::runs(2) }
    }

    pub fn with_fielder(mut self, fielder_id: impl Into<String>) -> Self {
        self.fielder_id = Some(fielder_id.into());
        self
    }

    pub fn with_rotation_override(mut self, swap: bool) -> Self {
        self.rotation_override = Some(swap);
        self
    }

    /// Runs completed alongside a dismissal (e.g. run out going for the second).
    pub fn with_runs(mut self, runs: u32) -> Self {
        self.runs = runs;
        if self.is_wicket && runs > 0 {
            self.display = format!("{}W", runs);
        }
        self
    }

    pub fn penalty_runs(&self) -> u32 {
        if self.extra_type.has_penalty() {
            ILLEGAL_BALL_PENALTY.min(self.runs)
        } else {
            0
        }
    }

    /// Runs credited to the batter on strike.
    pub fn credited_runs(&self) -> u32 {
        if self.extra_type.is_bye() {
            0
        } else {
            self.runs - self.penalty_runs()
        }
    }

    /// Whether the batter is charged with a ball faced. No-balls count
    /// because the bat was live.
    pub fn counts_as_faced(&self) -> bool {
        self.is_legal || self.extra_type == ExtraType::NoBall
    }

    /// Runs that decide strike rotation.
    pub fn rotation_runs(&self) -> u32 {
        if self.wall_bonus {
            1
        } else {
            self.runs - self.penalty_runs()
        }
    }

    /// Whether the run-parity rule (not the over boundary) swaps strike.
    pub fn swaps_strike(&self) -> bool {
        if self.is_wicket || !self.counts_as_faced() {
            return false;
        }
        match self.rotation_override {
            Some(swap) => swap,
            None => self.rotation_runs() % 2 == 1,
        }
    }

    /// Runs charged to the bowler's analysis.
    pub fn runs_conceded(&self) -> u32 {
        if self.extra_type.is_bye() {
            0
        } else {
            self.runs
        }
    }

    /// The delivery as a caller constructed it, without engine bookkeeping.
    pub fn without_prior(&self) -> Self {
        Self { prior: None, ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_and_no_ball_carry_penalty() {
        let wide = Delivery::wide(0);
        assert_eq!(wide.runs, 1);
        assert!(!wide.is_legal);
        assert_eq!(wide.credited_runs(), 0);
        assert!(!wide.counts_as_faced());

        let nb = Delivery::no_ball(4);
        assert_eq!(nb.runs, 5);
        assert_eq!(nb.credited_runs(), 4);
        assert!(nb.counts_as_faced());
        assert_eq!(nb.rotation_runs(), 4);
        assert!(!nb.swaps_strike());
    }

    #[test]
    fn test_byes_not_credited_but_rotate() {
        let bye = Delivery::bye(1);
        assert_eq!(bye.credited_runs(), 0);
        assert!(bye.swaps_strike());
        assert_eq!(bye.runs_conceded(), 0);
    }

    #[test]
    fn test_wall_bonus_rotates_like_single() {
        let wb = Delivery::wall_bonus();
        assert_eq!(wb.runs, 2);
        assert_eq!(wb.credited_runs(), 2);
        assert!(wb.swaps_strike());
    }

    #[test]
    fn test_rotation_override() {
        assert!(!Delivery::runs(1).with_rotation_override(false).swaps_strike());
        assert!(Delivery::runs(2).with_rotation_override(true).swaps_strike());
    }

    #[test]
    fn test_wicket_never_swaps() {
        let w = Delivery::wicket(DismissalType::RunOut).with_runs(1);
        assert!(!w.swaps_strike());
        assert_eq!(w.display, "1W");
    }

    #[test]
    fn test_dismissal_descriptions() {
        assert_eq!(DismissalType::Bowled.describe(Some("Jones"), None), "b Jones");
        assert_eq!(
            DismissalType::Caught.describe(Some("Jones"), Some("Smith")),
            "c Smith b Jones"
        );
        assert_eq!(DismissalType::Caught.describe(Some("Jones"), Some("Jones")), "c & b Jones");
        assert_eq!(DismissalType::RunOut.describe(Some("Jones"), Some("Lee")), "run out (Lee)");
        assert!(!DismissalType::RunOut.credits_bowler());
        assert!(DismissalType::Stumped.credits_bowler());
    }

    #[test]
    fn test_delivery_json_is_camel_case() {
        let json = serde_json::to_value(Delivery::wide(2)).unwrap();
        assert_eq!(json["extraType"], "WIDE");
        assert_eq!(json["isLegal"], false);
        assert!(json.get("prior").is_none());
    }
}
