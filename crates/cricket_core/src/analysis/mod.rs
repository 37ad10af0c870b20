//! # Match Analysis
//!
//! Read-only views derived from a [`Match`] snapshot: rates, the current
//! partnership, the result and scorecard tables. Nothing here mutates state.

pub mod partnership;
pub mod result;
pub mod run_rate;
pub mod scorecard;

pub use partnership::{get_partnership, Partnership};
pub use result::{get_match_result, MatchResult};
pub use run_rate::{current_run_rate, projected_score, required_run_rate, runs_required};
pub use scorecard::{
    batting_card, bowling_figures, current_over, fall_of_wickets, BattingLine, BowlerFigures,
    FallOfWicket,
};

use crate::models::{Match, MatchStatus, TeamSide};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Live summary of the active innings, as shown on a scoreboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetrics {
    pub match_id: String,
    pub status: MatchStatus,
    /// 1-based
    pub innings_number: usize,
    pub batting_team: Option<TeamSide>,
    pub total_runs: i32,
    pub wickets: u32,
    pub overs: String,
    pub current_run_rate: f64,
    pub required_run_rate: Option<f64>,
    pub runs_required: Option<i32>,
    pub projected_score: Option<f64>,
    pub partnership: Option<Partnership>,
    pub this_over: Vec<String>,
    pub result: Option<MatchResult>,
    pub result_summary: Option<String>,
}

impl MatchMetrics {
    pub fn from_match(state: &Match) -> Self {
        let innings = state.active_innings();
        let result = get_match_result(state);

        Self {
            match_id: state.id.clone(),
            status: state.status,
            innings_number: state.current_innings + 1,
            batting_team: state.batting_side(),
            total_runs: innings.map(|inn| inn.total_runs).unwrap_or(0),
            wickets: innings.map(|inn| inn.wickets).unwrap_or(0),
            overs: innings.map(|inn| inn.overs_display()).unwrap_or_else(|| "0.0".to_string()),
            current_run_rate: innings.map(current_run_rate).unwrap_or(0.0),
            required_run_rate: innings.and_then(required_run_rate),
            runs_required: innings.and_then(runs_required),
            projected_score: innings.and_then(projected_score),
            partnership: get_partnership(state),
            this_over: innings.map(current_over).unwrap_or_default(),
            result_summary: result.map(|r| r.summary(state)),
            result,
        }
    }

    /// "123/4 (15.2)"
    pub fn score_line(&self) -> String {
        format!("{}/{} ({})", self.total_runs, self.wickets, self.overs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Delivery, MatchFormat};
    use crate::testkit::{bowl_all, ready_match};

    #[test]
    fn test_metrics_for_live_innings() {
        let m = ready_match(MatchFormat::T20, 11);
        let m = bowl_all(&m, vec![Delivery::runs(4), Delivery::runs(2), Delivery::wide(0)]);
        let metrics = MatchMetrics::from_match(&m);

        assert_eq!(metrics.innings_number, 1);
        assert_eq!(metrics.batting_team, Some(TeamSide::A));
        assert_eq!(metrics.score_line(), "7/0 (0.2)");
        assert_eq!(metrics.this_over, vec!["4", "2", "Wd"]);
        assert!((metrics.current_run_rate - 21.0).abs() < 1e-9);
        assert_eq!(metrics.required_run_rate, None);
        assert_eq!(metrics.result, None);
        assert_eq!(metrics.partnership.map(|p| p.runs), Some(7));
    }

    #[test]
    fn test_metrics_serialize_camel_case() {
        let m = ready_match(MatchFormat::Indoor, 8);
        let json = serde_json::to_value(MatchMetrics::from_match(&m)).unwrap();
        assert_eq!(json["inningsNumber"], 1);
        assert_eq!(json["status"], "DRAFT");
        assert!(json["requiredRunRate"].is_null());
    }
}
