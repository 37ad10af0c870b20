//! Crease and roster management: the selections the scorer makes between
//! deliveries.
//!
//! Like the transitions, these never fail: an invalid selection returns the
//! input unchanged.

use super::lifecycle::rebuild_batting_order;
use crate::config::ScoringConfig;
use crate::models::{Match, MatchStatus, Player, TeamSide};
use tracing::{debug, info, warn};

fn at_crease(state: &Match, id: &str) -> bool {
    state.striker_id.as_deref() == Some(id) || state.non_striker_id.as_deref() == Some(id)
}

/// Some batter who is not out is waiting to come in.
fn fresh_batter_waiting(state: &Match) -> bool {
    state
        .batting_team()
        .map(|team| team.players.iter().any(|p| !p.is_out && !at_crease(state, &p.id)))
        .unwrap_or(false)
}

/// Whether `id` may walk out to bat: on the batting roster and not out.
/// Indoor batters already out this cycle may bat again once nobody else
/// is waiting.
fn can_bat(state: &Match, id: &str) -> bool {
    match state.batting_team().and_then(|team| team.player(id)) {
        Some(p) if !p.is_out => true,
        Some(_) => state.is_indoor() && !fresh_batter_waiting(state),
        None => false,
    }
}

pub fn set_striker(state: &Match, player_id: &str) -> Match {
    if !can_bat(state, player_id) || state.non_striker_id.as_deref() == Some(player_id) {
        warn!(match_id = %state.id, player_id, "striker selection rejected");
        return state.clone();
    }
    let mut next = state.clone();
    next.striker_id = Some(player_id.to_string());
    next.touch();
    next
}

pub fn set_non_striker(state: &Match, player_id: &str) -> Match {
    if !can_bat(state, player_id) || state.striker_id.as_deref() == Some(player_id) {
        warn!(match_id = %state.id, player_id, "non-striker selection rejected");
        return state.clone();
    }
    let mut next = state.clone();
    next.non_striker_id = Some(player_id.to_string());
    next.touch();
    next
}

pub fn set_bowler(state: &Match, player_id: &str) -> Match {
    let on_field = state.bowling_team().map(|team| team.contains(player_id)).unwrap_or(false);
    if !on_field {
        warn!(match_id = %state.id, player_id, "bowler selection rejected");
        return state.clone();
    }
    let mut next = state.clone();
    next.bowler_id = Some(player_id.to_string());
    next.touch();
    next
}

/// Manual strike change (e.g. batters crossed before a catch).
pub fn swap_strike(state: &Match) -> Match {
    let mut next = state.clone();
    next.swap_strike();
    next.touch();
    next
}

/// Next Indoor batter: first not-out player in batting order who is not
/// already at the crease. When every waiting batter is out the order wraps
/// and the first of them bats again until the cycle completes.
pub fn next_indoor_batter(state: &Match) -> Option<String> {
    if !state.is_indoor() {
        return None;
    }
    let team = state.batting_team()?;
    let mut waiting = state
        .batting_order
        .iter()
        .filter(|id| !at_crease(state, id))
        .filter_map(|id| team.player(id));
    let first = waiting.clone().next();
    waiting.find(|p| !p.is_out).or(first).map(|p| p.id.clone())
}

/// Change the overs limit before a ball is bowled, clamped to the format's
/// bounds. `None` lifts the limit.
pub fn set_overs_limit(state: &Match, overs: Option<u32>) -> Match {
    set_overs_limit_with(state, overs, &ScoringConfig::default())
}

/// [`set_overs_limit`] clamped to `config`'s bounds.
pub fn set_overs_limit_with(state: &Match, overs: Option<u32>, config: &ScoringConfig) -> Match {
    if state.innings.iter().any(|inn| !inn.deliveries.is_empty()) {
        warn!(match_id = %state.id, "overs limit change ignored after scoring started");
        return state.clone();
    }
    let policy = config.policy(state.format);
    let mut next = state.clone();
    next.overs_limit = overs.map(|o| policy.clamp_overs(o));
    for innings in &mut next.innings {
        innings.overs_limit = next.overs_limit;
    }
    next.touch();
    next
}

/// Change the squad size of a draft match, clamped to the format's bounds.
/// Longer rosters are truncated.
pub fn set_squad(state: &Match, size: usize) -> Match {
    set_squad_with(state, size, &ScoringConfig::default())
}

/// [`set_squad`] clamped to `config`'s bounds.
pub fn set_squad_with(state: &Match, size: usize, config: &ScoringConfig) -> Match {
    if state.status != MatchStatus::Draft {
        warn!(match_id = %state.id, status = ?state.status, "squad change ignored after match start");
        return state.clone();
    }
    let mut next = state.clone();
    next.squad_size = config.policy(state.format).clamp_squad(size);
    let squad = next.squad_size;
    next.team_a.truncate_squad(squad);
    next.team_b.truncate_squad(squad);
    if next.is_indoor() {
        rebuild_batting_order(&mut next);
        next.indoor_outs_in_cycle = 0;
    }
    debug!(match_id = %next.id, squad, "squad size set");
    next.touch();
    next
}

pub fn set_team_name(state: &Match, side: TeamSide, name: &str) -> Match {
    let mut next = state.clone();
    next.team_mut(side).name = name.to_string();
    next.touch();
    next
}

/// Add a player to a side. Once the squad is full further players join the
/// substitutes.
pub fn add_player(state: &Match, side: TeamSide, player: Player) -> Match {
    if state.player(&player.id).is_some() {
        warn!(match_id = %state.id, player_id = %player.id, "duplicate player id");
        return state.clone();
    }
    let mut next = state.clone();
    let squad = next.squad_size;
    let team = next.team_mut(side);
    if team.players.len() < squad {
        debug!(player_id = %player.id, ?side, "player added to squad");
        team.players.push(player);
    } else {
        debug!(player_id = %player.id, ?side, "squad full, player added to substitutes");
        team.substitutes.push(player);
    }
    if next.is_indoor() && next.status == MatchStatus::Draft {
        rebuild_batting_order(&mut next);
    }
    next.touch();
    next
}

pub fn set_captain(state: &Match, side: TeamSide, player_id: &str) -> Match {
    let mut next = state.clone();
    if !next.team_mut(side).set_captain(player_id) {
        return state.clone();
    }
    next.touch();
    next
}

pub fn set_keeper(state: &Match, side: TeamSide, player_id: &str) -> Match {
    let mut next = state.clone();
    if !next.team_mut(side).set_keeper(player_id) {
        return state.clone();
    }
    next.touch();
    next
}

pub fn abandon_match(state: &Match) -> Match {
    set_status(state, MatchStatus::Abandoned)
}

pub fn delete_match(state: &Match) -> Match {
    set_status(state, MatchStatus::Deleted)
}

fn set_status(state: &Match, status: MatchStatus) -> Match {
    if state.status == MatchStatus::Deleted {
        return state.clone();
    }
    let mut next = state.clone();
    next.status = status;
    info!(match_id = %next.id, ?status, "match status changed");
    next.touch();
    next
}
