//! String-in, string-out bridge over the engine for host UIs.
//!
//! Every function takes the current match as JSON and returns the next
//! match (or a derived view) as JSON. Malformed input is the only failure;
//! invalid scoring requests come back as the unchanged match.

use crate::analysis::MatchMetrics;
use crate::engine::{self, ScoringCommand};
use crate::error::{EngineError, Result};
use crate::models::{Delivery, Match, MatchFormat, Toss};
use schemars::schema::RootSchema;
use serde::Serialize;
use tracing::debug;

/// Version of the JSON shapes exchanged through this module.
pub const API_VERSION: &str = "v1";

fn parse_match(match_json: &str) -> Result<Match> {
    let state: Match = serde_json::from_str(match_json)?;
    if state.innings.is_empty() {
        return Err(EngineError::InvalidRequest("match has no innings".to_string()));
    }
    if state.current_innings >= state.innings.len() {
        return Err(EngineError::InvalidRequest(format!(
            "current innings {} out of range ({} innings)",
            state.current_innings,
            state.innings.len()
        )));
    }
    Ok(state)
}

fn to_json(state: &Match) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

pub fn create_match_json() -> Result<String> {
    let state = engine::create_new_match();
    debug!(match_id = %state.id, "match created");
    to_json(&state)
}

/// `format` is a format code: "INDOOR", "T20" or "ODI" (case-insensitive).
pub fn apply_format_json(match_json: &str, format: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    let format: MatchFormat =
        format.parse().map_err(|_| EngineError::UnknownFormat(format.to_string()))?;
    to_json(&engine::apply_format(&state, format))
}

pub fn apply_delivery_json(match_json: &str, delivery_json: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    let delivery: Delivery = serde_json::from_str(delivery_json)?;
    if delivery.prior.is_some() {
        return Err(EngineError::InvalidRequest(
            "delivery must not carry engine bookkeeping".to_string(),
        ));
    }
    to_json(&engine::apply_delivery(&state, delivery))
}

pub fn undo_last_delivery_json(match_json: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    to_json(&engine::undo_last_delivery(&state))
}

/// `toss_json`: `{"winner":"A","decision":"BOWL"}`
pub fn apply_toss_json(match_json: &str, toss_json: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    let toss: Toss = serde_json::from_str(toss_json)?;
    to_json(&engine::apply_toss(&state, toss.winner, toss.decision))
}

pub fn start_next_innings_json(match_json: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    to_json(&engine::start_next_innings(&state))
}

pub fn end_innings_json(match_json: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    to_json(&engine::end_innings(&state))
}

/// Apply a single [`ScoringCommand`].
pub fn apply_command_json(match_json: &str, command_json: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    let command: ScoringCommand = serde_json::from_str(command_json)?;
    to_json(&engine::apply_command(&state, &command))
}

/// Apply a JSON array of commands in order.
pub fn replay_commands_json(match_json: &str, commands_json: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    let commands: Vec<ScoringCommand> = serde_json::from_str(commands_json)?;
    debug!(match_id = %state.id, commands = commands.len(), "replaying commands");
    to_json(&engine::replay(&state, &commands))
}

/// Scoreboard view of the active innings, see [`MatchMetrics`].
/// Scoreboard view stamped with the API version.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricsResponse {
    schema_version: &'static str,
    #[serde(flatten)]
    metrics: MatchMetrics,
}

pub fn match_metrics_json(match_json: &str) -> Result<String> {
    let state = parse_match(match_json)?;
    let response =
        MetricsResponse { schema_version: API_VERSION, metrics: MatchMetrics::from_match(&state) };
    Ok(serde_json::to_string(&response)?)
}

/// JSON Schema of the persisted [`Match`] document.
pub fn match_json_schema() -> RootSchema {
    schemars::schema_for!(Match)
}

pub fn match_json_schema_string() -> Result<String> {
    Ok(serde_json::to_string_pretty(&match_json_schema())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, TeamSide};
    use serde_json::{json, Value};

    fn ready_json() -> String {
        let m = create_match_json().unwrap();
        let m = apply_format_json(&m, "t20").unwrap();
        let commands = json!([
            {"type": "addPlayer", "side": "A", "id": "a0", "name": "Asha"},
            {"type": "addPlayer", "side": "A", "id": "a1", "name": "Ben"},
            {"type": "addPlayer", "side": "B", "id": "b0", "name": "Cal"},
            {"type": "setStriker", "playerId": "a0"},
            {"type": "setNonStriker", "playerId": "a1"},
            {"type": "setBowler", "playerId": "b0"}
        ]);
        replay_commands_json(&m, &commands.to_string()).unwrap()
    }

    #[test]
    fn test_create_match_json() {
        let value: Value = serde_json::from_str(&create_match_json().unwrap()).unwrap();
        assert_eq!(value["format"], "INDOOR");
        assert_eq!(value["status"], "DRAFT");
        assert_eq!(value["oversLimit"], 16);
        assert_eq!(value["innings"].as_array().map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_apply_delivery_json() {
        let m = ready_json();
        let next = apply_delivery_json(&m, r#"{"runs":4,"isLegal":true,"isWicket":false}"#).unwrap();
        let state: Match = serde_json::from_str(&next).unwrap();
        assert_eq!(state.innings[0].total_runs, 4);
        assert_eq!(state.status, MatchStatus::Live);
        assert_eq!(state.team_a.player("a0").map(|p| p.fours), Some(1));

        let undone: Match = serde_json::from_str(&undo_last_delivery_json(&next).unwrap()).unwrap();
        assert_eq!(undone.innings[0].total_runs, 0);
        assert_eq!(undone.status, MatchStatus::Draft);
    }

    #[test]
    fn test_metrics_json() {
        let m = ready_json();
        let m = apply_command_json(
            &m,
            r#"{"type":"ball","delivery":{"runs":1,"isLegal":true,"isWicket":false}}"#,
        )
        .unwrap();
        let metrics: Value = serde_json::from_str(&match_metrics_json(&m).unwrap()).unwrap();
        assert_eq!(metrics["schemaVersion"], API_VERSION);
        assert_eq!(metrics["totalRuns"], 1);
        assert_eq!(metrics["overs"], "0.1");
        assert_eq!(metrics["partnership"]["strikerId"], "a1");
    }

    #[test]
    fn test_toss_json() {
        let m = ready_json();
        let m = apply_toss_json(&m, r#"{"winner":"A","decision":"BOWL"}"#).unwrap();
        let state: Match = serde_json::from_str(&m).unwrap();
        assert_eq!(state.innings[0].batting_team, TeamSide::B);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert!(matches!(
            undo_last_delivery_json("not json"),
            Err(EngineError::DeserializationError(_))
        ));

        let m = create_match_json().unwrap();
        assert!(matches!(apply_format_json(&m, "TEST"), Err(EngineError::UnknownFormat(_))));

        let mut value: Value = serde_json::from_str(&m).unwrap();
        value["currentInnings"] = json!(3);
        assert!(matches!(
            end_innings_json(&value.to_string()),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_serialized_match_conforms_to_schema() {
        let schema = serde_json::to_value(match_json_schema()).unwrap();
        let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();

        let m = ready_json();
        let m = apply_delivery_json(&m, r#"{"runs":1,"isLegal":false,"isWicket":false,"extraType":"WIDE"}"#)
            .unwrap();
        let instance: Value = serde_json::from_str(&m).unwrap();
        assert!(compiled.is_valid(&instance));
    }
}
