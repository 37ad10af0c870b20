//! Innings lifecycle: match creation, format selection, toss, innings changes.

use crate::config::ScoringConfig;
use crate::models::{
    Innings, Match, MatchFormat, MatchStatus, Team, TeamSide, Toss, TossDecision,
};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// A fresh draft match: Indoor format, one initialised innings, empty rosters.
pub fn create_new_match() -> Match {
    let format = MatchFormat::Indoor;
    let policy = format.policy();
    let now = Utc::now();

    Match {
        id: Uuid::new_v4().to_string(),
        team_a: Team::new("Team A"),
        team_b: Team::new("Team B"),
        format,
        overs_limit: policy.overs_limit,
        innings_count: policy.innings_count,
        squad_size: policy.default_squad,
        current_innings: 0,
        innings: vec![Innings::new(TeamSide::A, policy.overs_limit)],
        striker_id: None,
        non_striker_id: None,
        bowler_id: None,
        toss: None,
        status: MatchStatus::Draft,
        batting_order: Vec::new(),
        indoor_outs_in_cycle: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Apply `format` using the built-in policy table.
pub fn apply_format(state: &Match, format: MatchFormat) -> Match {
    apply_format_with(state, format, &ScoringConfig::default())
}

/// Apply `format` using `config`'s policy table.
///
/// Only draft matches can change format. The squad size is clamped to the
/// new format's bounds and longer rosters are truncated.
pub fn apply_format_with(state: &Match, format: MatchFormat, config: &ScoringConfig) -> Match {
    if state.status != MatchStatus::Draft {
        warn!(match_id = %state.id, status = ?state.status, "format change ignored after match start");
        return state.clone();
    }

    let policy = config.policy(format);
    let mut next = state.clone();

    next.squad_size = policy.clamp_squad(state.squad_size);
    next.format = format;
    next.overs_limit = policy.overs_limit.map(|overs| policy.clamp_overs(overs));
    next.innings_count = policy.innings_count;

    next.innings.truncate(policy.innings_count as usize);
    next.current_innings = next.current_innings.min(next.innings.len().saturating_sub(1));
    for innings in &mut next.innings {
        innings.overs_limit = next.overs_limit;
    }

    let squad = next.squad_size;
    next.team_a.truncate_squad(squad);
    next.team_b.truncate_squad(squad);

    if format.is_indoor() {
        rebuild_batting_order(&mut next);
    } else {
        next.batting_order.clear();
    }
    next.indoor_outs_in_cycle = 0;

    debug!(
        match_id = %next.id,
        format = format.code(),
        overs = ?next.overs_limit,
        squad = next.squad_size,
        "format applied"
    );
    next.touch();
    next
}

/// Record the toss and set the first innings' batting side.
pub fn apply_toss(state: &Match, winner: TeamSide, decision: TossDecision) -> Match {
    let started = state.innings.iter().any(|inn| !inn.deliveries.is_empty());
    if started || state.current_innings != 0 {
        warn!(match_id = %state.id, "toss ignored after scoring started");
        return state.clone();
    }

    let toss = Toss { winner, decision };
    let mut next = state.clone();
    next.toss = Some(toss);
    if let Some(first) = next.innings.first_mut() {
        first.set_batting_team(toss.batting_first());
    }
    if next.is_indoor() {
        rebuild_batting_order(&mut next);
        next.indoor_outs_in_cycle = 0;
    }

    info!(match_id = %next.id, ?winner, ?decision, "toss recorded");
    next.touch();
    next
}

/// Move to the second innings: swap sides, set the target, reset the new
/// batting side's figures and clear the crease.
pub fn start_next_innings(state: &Match) -> Match {
    let next_index = state.current_innings + 1;
    if next_index >= state.innings_count as usize {
        debug!(match_id = %state.id, "no further innings to start");
        return state.clone();
    }
    let Some(current) = state.active_innings() else {
        return state.clone();
    };

    let target = current.total_runs + 1;
    let batting = current.bowling_team;
    let overs_limit = state.overs_limit;

    let mut next = state.clone();
    next.innings[state.current_innings].completed = true;

    if let Some(existing) = next.innings.get_mut(next_index) {
        existing.set_batting_team(batting);
        existing.target = Some(target);
        existing.overs_limit = overs_limit;
        existing.completed = false;
    } else {
        next.innings.push(Innings::chasing(batting, overs_limit, target));
    }
    next.current_innings = next_index;

    next.team_mut(batting).reset_batting();
    next.striker_id = None;
    next.non_striker_id = None;
    next.bowler_id = None;
    next.indoor_outs_in_cycle = 0;
    if next.is_indoor() {
        rebuild_batting_order(&mut next);
    }
    if next.status == MatchStatus::Draft {
        next.status = MatchStatus::Live;
    }

    info!(match_id = %next.id, innings = next_index + 1, target, "innings started");
    next.touch();
    next
}

/// Mark the active innings completed. Closing the final innings completes
/// the match.
pub fn end_innings(state: &Match) -> Match {
    let mut next = state.clone();
    let Some(innings) = next.active_innings_mut() else {
        return next;
    };
    innings.completed = true;

    if next.current_innings + 1 >= next.innings_count as usize
        && next.status.is_scoreable()
    {
        next.status = MatchStatus::Completed;
    }

    info!(match_id = %next.id, innings = next.current_innings + 1, "innings ended");
    next.touch();
    next
}

/// Batting order for the Indoor re-batting cycle: the batting roster in
/// squad order.
pub(crate) fn rebuild_batting_order(state: &mut Match) {
    let Some(side) = state.batting_side() else {
        state.batting_order.clear();
        return;
    };
    state.batting_order = state.team(side).players.iter().map(|p| p.id.clone()).collect();
}
