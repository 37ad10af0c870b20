use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rostered player and their batting figures for the current innings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,

    // Batting totals (reset at the start of each innings the team bats)
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,

    pub is_out: bool,
    /// e.g. "c Smith b Jones"
    #[serde(default)]
    pub dismissal: Option<String>,
    /// Indoor only: how many times this batter has been dismissed this innings
    #[serde(default)]
    pub outs_count: u32,

    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_keeper: bool,
}

impl Player {
    /// Create a player with a generated ID
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            dismissal: None,
            outs_count: 0,
            is_captain: false,
            is_keeper: false,
        }
    }

    /// Zero the per-innings batting figures, keeping identity and role flags.
    pub fn reset_batting(&mut self) {
        self.runs = 0;
        self.balls = 0;
        self.fours = 0;
        self.sixes = 0;
        self.is_out = false;
        self.dismissal = None;
        self.outs_count = 0;
    }

    /// Credit runs off the bat. Boundaries are counted on exact 4s and 6s.
    pub fn credit(&mut self, runs: u32, faced: bool) {
        self.runs += runs;
        if faced {
            self.balls += 1;
        }
        match runs {
            4 => self.fours += 1,
            6 => self.sixes += 1,
            _ => {}
        }
    }

    /// Inverse of [`Player::credit`].
    pub fn uncredit(&mut self, runs: u32, faced: bool) {
        self.runs = self.runs.saturating_sub(runs);
        if faced {
            self.balls = self.balls.saturating_sub(1);
        }
        match runs {
            4 => self.fours = self.fours.saturating_sub(1),
            6 => self.sixes = self.sixes.saturating_sub(1),
            _ => {}
        }
    }

    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            self.runs as f64 * 100.0 / self.balls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_counts_boundaries() {
        let mut p = Player::with_id("p1", "Asha");
        p.credit(4, true);
        p.credit(6, true);
        p.credit(5, true);
        assert_eq!(p.runs, 15);
        assert_eq!(p.balls, 3);
        assert_eq!(p.fours, 1);
        assert_eq!(p.sixes, 1);

        p.uncredit(6, true);
        assert_eq!(p.runs, 9);
        assert_eq!(p.sixes, 0);
    }

    #[test]
    fn test_reset_keeps_identity() {
        let mut p = Player::with_id("p1", "Asha");
        p.is_captain = true;
        p.credit(4, true);
        p.is_out = true;
        p.outs_count = 2;
        p.reset_batting();
        assert_eq!(p.id, "p1");
        assert!(p.is_captain);
        assert_eq!(p.runs, 0);
        assert!(!p.is_out);
        assert_eq!(p.outs_count, 0);
    }

    #[test]
    fn test_strike_rate() {
        let mut p = Player::new("Ravi");
        assert_eq!(p.strike_rate(), 0.0);
        p.credit(3, true);
        p.credit(0, true);
        assert!((p.strike_rate() - 150.0).abs() < 1e-9);
    }
}
