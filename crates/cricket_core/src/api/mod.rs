pub mod json_api;

pub use json_api::{
    apply_command_json, apply_delivery_json, apply_format_json, apply_toss_json,
    create_match_json, end_innings_json, match_json_schema, match_json_schema_string,
    match_metrics_json, replay_commands_json, start_next_innings_json, undo_last_delivery_json,
    API_VERSION,
};
