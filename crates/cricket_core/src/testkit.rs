//! Fixtures shared by unit tests.

use crate::engine::{
    add_player, apply_delivery, apply_format, create_new_match, set_bowler, set_non_striker,
    set_squad, set_striker,
};
use crate::models::{Delivery, Match, MatchFormat, Player, TeamSide};

/// `squad` players per side ("a0".."aN", "b0".."bN"), team A batting with
/// a0 on strike, a1 at the other end and b0 bowling.
pub(crate) fn ready_match(format: MatchFormat, squad: usize) -> Match {
    let mut m = set_squad(&apply_format(&create_new_match(), format), squad);
    m.team_a.name = "Aces".to_string();
    m.team_b.name = "Bats".to_string();
    for i in 0..squad {
        m = add_player(&m, TeamSide::A, Player::with_id(format!("a{}", i), format!("A{}", i)));
        m = add_player(&m, TeamSide::B, Player::with_id(format!("b{}", i), format!("B{}", i)));
    }
    let m = set_striker(&m, "a0");
    let m = set_non_striker(&m, "a1");
    set_bowler(&m, "b0")
}

/// Bring on a bowler from the fielding side if the last over cleared it,
/// rotating through the roster by over number.
pub(crate) fn bring_on_bowler(state: &Match) -> Match {
    if state.bowler_id.is_some() {
        return state.clone();
    }
    let bowling = state.bowling_team().map(|t| t.players.clone()).unwrap_or_default();
    let over = state.active_innings().map(|inn| inn.total_balls / 6).unwrap_or(0) as usize;
    match bowling.get(over % bowling.len().max(1)) {
        Some(player) => set_bowler(state, &player.id),
        None => state.clone(),
    }
}

pub(crate) fn bowl(state: &Match, delivery: Delivery) -> Match {
    apply_delivery(&bring_on_bowler(state), delivery)
}

pub(crate) fn bowl_all(state: &Match, deliveries: impl IntoIterator<Item = Delivery>) -> Match {
    deliveries.into_iter().fold(state.clone(), |m, d| bowl(&m, d))
}

/// Equality ignoring the last-modified timestamp.
pub(crate) fn same_state(a: &Match, b: &Match) -> bool {
    let mut a = a.clone();
    a.updated_at = b.updated_at;
    a == *b
}
