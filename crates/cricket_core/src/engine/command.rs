//! Scoring commands: every mutating operation as serialisable data, so a
//! scoring script or UI bridge can drive and replay a match.

use super::{crease, delivery, lifecycle, undo};
use crate::models::{Delivery, Match, MatchFormat, Player, TeamSide, TossDecision};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ScoringCommand {
    SetFormat { format: MatchFormat },
    SetOversLimit { overs: Option<u32> },
    SetSquad { size: usize },
    SetTeamName { side: TeamSide, name: String },
    AddPlayer {
        side: TeamSide,
        #[serde(default)]
        id: Option<String>,
        name: String,
    },
    SetCaptain {
        side: TeamSide,
        #[serde(rename = "playerId")]
        player_id: String,
    },
    SetKeeper {
        side: TeamSide,
        #[serde(rename = "playerId")]
        player_id: String,
    },
    Toss { winner: TeamSide, decision: TossDecision },
    SetStriker {
        #[serde(rename = "playerId")]
        player_id: String,
    },
    SetNonStriker {
        #[serde(rename = "playerId")]
        player_id: String,
    },
    SetBowler {
        #[serde(rename = "playerId")]
        player_id: String,
    },
    /// Send in the next batter from the Indoor batting order to the empty end
    NextIndoorBatter,
    SwapStrike,
    Ball { delivery: Delivery },
    Undo,
    StartNextInnings,
    EndInnings,
    Abandon,
}

pub fn apply_command(state: &Match, command: &ScoringCommand) -> Match {
    match command {
        ScoringCommand::SetFormat { format } => lifecycle::apply_format(state, *format),
        ScoringCommand::SetOversLimit { overs } => crease::set_overs_limit(state, *overs),
        ScoringCommand::SetSquad { size } => crease::set_squad(state, *size),
        ScoringCommand::SetTeamName { side, name } => crease::set_team_name(state, *side, name),
        ScoringCommand::AddPlayer { side, id, name } => {
            let player = match id {
                Some(id) => Player::with_id(id.clone(), name.clone()),
                None => Player::new(name.clone()),
            };
            crease::add_player(state, *side, player)
        }
        ScoringCommand::SetCaptain { side, player_id } => {
            crease::set_captain(state, *side, player_id)
        }
        ScoringCommand::SetKeeper { side, player_id } => crease::set_keeper(state, *side, player_id),
        ScoringCommand::Toss { winner, decision } => lifecycle::apply_toss(state, *winner, *decision),
        ScoringCommand::SetStriker { player_id } => crease::set_striker(state, player_id),
        ScoringCommand::SetNonStriker { player_id } => crease::set_non_striker(state, player_id),
        ScoringCommand::SetBowler { player_id } => crease::set_bowler(state, player_id),
        ScoringCommand::NextIndoorBatter => match crease::next_indoor_batter(state) {
            Some(id) if state.striker_id.is_none() => crease::set_striker(state, &id),
            Some(id) if state.non_striker_id.is_none() => crease::set_non_striker(state, &id),
            _ => state.clone(),
        },
        ScoringCommand::SwapStrike => crease::swap_strike(state),
        ScoringCommand::Ball { delivery: ball } => delivery::apply_delivery(state, ball.clone()),
        ScoringCommand::Undo => undo::undo_last_delivery(state),
        ScoringCommand::StartNextInnings => lifecycle::start_next_innings(state),
        ScoringCommand::EndInnings => lifecycle::end_innings(state),
        ScoringCommand::Abandon => crease::abandon_match(state),
    }
}

/// Apply `commands` in order.
pub fn replay<'a>(state: &Match, commands: impl IntoIterator<Item = &'a ScoringCommand>) -> Match {
    commands.into_iter().fold(state.clone(), |acc, command| apply_command(&acc, command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::create_new_match;
    use crate::models::DismissalType;

    #[test]
    fn test_command_json_shape() {
        let json = r#"[
            {"type":"setFormat","format":"T20"},
            {"type":"addPlayer","side":"A","id":"a0","name":"Asha"},
            {"type":"setStriker","playerId":"a0"},
            {"type":"ball","delivery":{"runs":4,"isLegal":true,"isWicket":false}},
            {"type":"undo"}
        ]"#;
        let commands: Vec<ScoringCommand> = serde_json::from_str(json).unwrap();
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], ScoringCommand::SetFormat { format: MatchFormat::T20 });
        assert!(matches!(&commands[3], ScoringCommand::Ball { delivery } if delivery.runs == 4));
    }

    #[test]
    fn test_set_squad_command() {
        let commands: Vec<ScoringCommand> = serde_json::from_str(
            r#"[{"type":"setFormat","format":"ODI"},{"type":"setSquad","size":11}]"#,
        )
        .unwrap();
        let m = replay(&create_new_match(), &commands);
        assert_eq!(m.format, MatchFormat::Odi);
        assert_eq!(m.squad_size, 11);
    }

    #[test]
    fn test_indoor_cycle_reachable_through_commands() {
        let mut commands = vec![ScoringCommand::SetFormat { format: MatchFormat::Indoor }];
        for (side, prefix) in [(TeamSide::A, "a"), (TeamSide::B, "b")] {
            for i in 0..4 {
                commands.push(ScoringCommand::AddPlayer {
                    side,
                    id: Some(format!("{}{}", prefix, i)),
                    name: format!("{}{}", prefix.to_uppercase(), i),
                });
            }
        }
        commands.extend([
            ScoringCommand::SetSquad { size: 4 },
            ScoringCommand::NextIndoorBatter,
            ScoringCommand::NextIndoorBatter,
            ScoringCommand::SetBowler { player_id: "b0".into() },
        ]);
        let mut m = replay(&create_new_match(), &commands);

        let wicket = ScoringCommand::Ball { delivery: Delivery::wicket(DismissalType::Bowled) };
        for round in 1..=4u32 {
            m = apply_command(&m, &wicket);
            assert_eq!(m.innings[0].wickets, round);
            m = apply_command(&m, &ScoringCommand::NextIndoorBatter);
            assert!(m.striker_id.is_some(), "round {} left the striker's end empty", round);
        }
        assert_eq!(m.indoor_outs_in_cycle, 0);
        assert!(m.team_a.players.iter().all(|p| !p.is_out));

        let m = apply_command(&m, &ScoringCommand::Ball { delivery: Delivery::runs(1) });
        assert_eq!(m.innings[0].deliveries.len(), 5);
    }

    #[test]
    fn test_replay_builds_roster() {
        let commands = vec![
            ScoringCommand::SetFormat { format: MatchFormat::T20 },
            ScoringCommand::SetTeamName { side: TeamSide::B, name: "Visitors".into() },
            ScoringCommand::AddPlayer { side: TeamSide::A, id: Some("a0".into()), name: "Asha".into() },
            ScoringCommand::SetCaptain { side: TeamSide::A, player_id: "a0".into() },
        ];
        let m = replay(&create_new_match(), &commands);
        assert_eq!(m.format, MatchFormat::T20);
        assert_eq!(m.team_b.name, "Visitors");
        assert_eq!(m.team_a.captain_id.as_deref(), Some("a0"));
    }
}
