//! # cricket_core - Ball-by-Ball Cricket Scoring Engine
//!
//! Deterministic scoring for Indoor, T20 and ODI matches, with a JSON API for
//! UI hosts.
//!
//! ## Features
//! - Snapshot transitions: every operation takes a match and returns the next
//! - Strike rotation, over boundaries, extras and Indoor wicket penalties
//! - Exact undo of the last delivery
//! - Run rates, partnerships, results and scorecards from the delivery log
//! - Checksummed, compressed save files

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Method naming conventions - would require API changes
#![allow(clippy::should_implement_trait)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;
pub mod state;

#[cfg(test)]
pub(crate) mod testkit;

// Re-export main API functions
pub use api::{
    apply_command_json, apply_delivery_json, apply_format_json, apply_toss_json,
    create_match_json, end_innings_json, match_json_schema, match_metrics_json,
    replay_commands_json, start_next_innings_json, undo_last_delivery_json,
};
pub use error::{EngineError, Result};

// Re-export engine operations
pub use engine::{
    apply_command, apply_delivery, apply_format, apply_format_with, apply_toss, create_new_match,
    end_innings, replay, start_next_innings, undo_last_delivery, ScoringCommand,
};

// Re-export data model
pub use models::{
    Delivery, DismissalType, ExtraType, Innings, Match, MatchFormat, MatchStatus, Player, Team,
    TeamSide, TossDecision,
};

// Re-export analysis
pub use analysis::{
    current_run_rate, get_match_result, get_partnership, projected_score, required_run_rate,
    MatchMetrics, MatchResult, Partnership,
};

// Re-export save system
pub use save::{MatchSave, SaveError, SaveManager};

// Re-export session
pub use state::ScoringSession;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    fn scripted_innings() -> Match {
        let mut commands = vec![ScoringCommand::SetFormat { format: MatchFormat::T20 }];
        for i in 0..4 {
            commands.push(ScoringCommand::AddPlayer {
                side: TeamSide::A,
                id: Some(format!("a{}", i)),
                name: format!("Bat {}", i),
            });
            commands.push(ScoringCommand::AddPlayer {
                side: TeamSide::B,
                id: Some(format!("b{}", i)),
                name: format!("Bowl {}", i),
            });
        }
        commands.extend([
            ScoringCommand::SetStriker { player_id: "a0".into() },
            ScoringCommand::SetNonStriker { player_id: "a1".into() },
            ScoringCommand::SetBowler { player_id: "b0".into() },
        ]);
        for runs in [1, 0, 4, 6, 2, 3] {
            commands.push(ScoringCommand::Ball { delivery: Delivery::runs(runs) });
        }
        commands.push(ScoringCommand::SetBowler { player_id: "b1".into() });
        commands.push(ScoringCommand::Ball { delivery: Delivery::wide(0) });
        commands.push(ScoringCommand::Ball { delivery: Delivery::wicket(DismissalType::Bowled) });
        replay(&create_new_match(), &commands)
    }

    #[test]
    fn test_determinism() {
        let digest = |m: &Match| {
            let json = serde_json::to_string(&m.innings).unwrap();
            Sha256::digest(json.as_bytes())
        };
        let first = scripted_innings();
        let second = scripted_innings();
        assert_eq!(digest(&first), digest(&second));
        assert_eq!(first.innings[0].total_runs, 17);
        assert_eq!(first.innings[0].wickets, 1);
    }

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
