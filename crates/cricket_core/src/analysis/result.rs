use crate::models::{Match, TeamSide};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchResult {
    /// Chasing side reached the target
    #[serde(rename_all = "camelCase")]
    WonByWickets {
        winner: TeamSide,
        wickets: u32,
        /// `None` for unlimited-overs innings
        balls_remaining: Option<u32>,
    },
    WonByRuns { winner: TeamSide, runs: i32 },
    Tie,
}

impl MatchResult {
    pub fn winner(&self) -> Option<TeamSide> {
        match self {
            MatchResult::WonByWickets { winner, .. } | MatchResult::WonByRuns { winner, .. } => {
                Some(*winner)
            }
            MatchResult::Tie => None,
        }
    }

    /// e.g. "Bats won by 5 wickets (12 balls remaining)".
    pub fn summary(&self, state: &Match) -> String {
        match self {
            MatchResult::WonByWickets { winner, wickets, balls_remaining } => {
                let name = &state.team(*winner).name;
                let mut text = format!("{} won by {} {}", name, wickets, plural(*wickets as i64, "wicket"));
                if let Some(balls) = balls_remaining {
                    text.push_str(&format!(" ({} {} remaining)", balls, plural(*balls as i64, "ball")));
                }
                text
            }
            MatchResult::WonByRuns { winner, runs } => {
                let name = &state.team(*winner).name;
                format!("{} won by {} {}", name, runs, plural(*runs as i64, "run"))
            }
            MatchResult::Tie => "Match tied".to_string(),
        }
    }
}

fn plural(n: i64, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Result of a two-innings match once the second innings is complete.
///
/// A successful chase is a win by wickets in hand and balls remaining.
/// Indoor sides can lose more wickets than they have batters, so wickets in
/// hand bottom out at zero.
pub fn get_match_result(state: &Match) -> Option<MatchResult> {
    if state.innings.len() != 2 {
        return None;
    }
    let (first, second) = (&state.innings[0], &state.innings[1]);
    if !second.completed {
        return None;
    }

    let margin = second.total_runs - first.total_runs;
    if margin > 0 {
        let team = state.team(second.batting_team);
        let squad = if team.players.is_empty() { state.squad_size } else { team.players.len() };
        let wickets_in_hand = (squad as u32).saturating_sub(1).saturating_sub(second.wickets);
        Some(MatchResult::WonByWickets {
            winner: second.batting_team,
            wickets: wickets_in_hand,
            balls_remaining: second.balls_remaining(),
        })
    } else if margin < 0 {
        Some(MatchResult::WonByRuns { winner: first.batting_team, runs: -margin })
    } else {
        Some(MatchResult::Tie)
    }
}
