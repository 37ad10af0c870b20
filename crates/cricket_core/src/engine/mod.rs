//! # Scoring Engine
//!
//! State transitions over [`Match`](crate::models::Match) snapshots. Every
//! function takes the current snapshot by reference and returns a new owned
//! snapshot; none of them fail. Invalid requests return the input unchanged.

pub mod command;
pub mod crease;
pub mod delivery;
pub mod lifecycle;
pub mod undo;

#[cfg(test)]
mod properties_test;

pub use command::{apply_command, replay, ScoringCommand};
pub use crease::{
    abandon_match, add_player, delete_match, next_indoor_batter, set_bowler, set_captain,
    set_keeper, set_non_striker, set_overs_limit, set_overs_limit_with, set_squad, set_squad_with,
    set_striker, set_team_name, swap_strike,
};
pub use delivery::apply_delivery;
pub use lifecycle::{
    apply_format, apply_format_with, apply_toss, create_new_match, end_innings,
    start_next_innings,
};
pub use undo::undo_last_delivery;
