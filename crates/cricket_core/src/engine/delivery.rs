//! The delivery transition: one ball in, the next match snapshot out.

use crate::models::{Delivery, Innings, Match, MatchStatus, PriorState};
use tracing::{debug, info};

/// Apply one delivery to `state` and return the next snapshot.
///
/// Without a striker, non-striker and bowler assigned (or when the active
/// innings or the match is already closed) the input is returned unchanged.
pub fn apply_delivery(state: &Match, delivery: Delivery) -> Match {
    let (Some(striker), Some(_), Some(bowler)) =
        (state.striker_id.as_deref(), state.non_striker_id.as_deref(), state.bowler_id.as_deref())
    else {
        debug!(match_id = %state.id, "delivery ignored: crease not assigned");
        return state.clone();
    };
    if !state.status.is_scoreable() {
        debug!(match_id = %state.id, status = ?state.status, "delivery ignored: match closed");
        return state.clone();
    }
    match state.active_innings() {
        Some(innings) if !innings.completed => {}
        _ => {
            debug!(match_id = %state.id, "delivery ignored: innings closed");
            return state.clone();
        }
    }

    let striker = striker.to_string();
    let bowler = bowler.to_string();
    let format = state.format;
    let idx = state.current_innings;

    let mut delivery = delivery;
    if delivery.wall_bonus && !format.is_indoor() {
        debug!(match_id = %state.id, "wall bonus only applies indoors, scored as plain runs");
        delivery.wall_bonus = false;
    }
    delivery.batter_id = Some(striker.clone());
    delivery.bowler_id = Some(bowler.clone());

    let mut prior = PriorState {
        striker_id: state.striker_id.clone(),
        non_striker_id: state.non_striker_id.clone(),
        bowler_id: state.bowler_id.clone(),
        status: state.status,
        indoor_outs_in_cycle: state.indoor_outs_in_cycle,
        dismissal_before: None,
        batter_was_out: false,
        cycle_reset_ids: Vec::new(),
        appended_innings: false,
    };

    let mut next = state.clone();
    if next.status == MatchStatus::Draft {
        next.status = MatchStatus::Live;
    }

    {
        let innings = &mut next.innings[idx];
        innings.total_runs += delivery.runs as i32;
        innings.extras.record(delivery.extra_type);
        if delivery.is_legal {
            innings.total_balls += 1;
        }
    }

    if delivery.is_wicket {
        next.innings[idx].wickets += 1;
        next.innings[idx].total_runs -= format.wicket_penalty();

        let description = delivery.dismissal_type.map(|kind| {
            let fielder = delivery.fielder_id.as_deref().and_then(|id| state.player_name(id));
            kind.describe(state.player_name(&bowler), fielder)
        });
        if let Some(batter) = next.player_mut(&striker) {
            prior.dismissal_before = batter.dismissal.clone();
            prior.batter_was_out = batter.is_out;
            batter.is_out = true;
            batter.dismissal = description.or_else(|| Some("out".to_string()));
            if format.is_indoor() {
                batter.outs_count += 1;
            }
        }
        next.striker_id = None;

        if format.is_indoor() {
            next.indoor_outs_in_cycle += 1;
            let squad = next.batting_squad_size();
            if squad > 0 && next.indoor_outs_in_cycle >= squad {
                prior.cycle_reset_ids = reset_indoor_cycle(&mut next);
            }
        }
    } else {
        if let Some(batter) = next.player_mut(&striker) {
            batter.credit(delivery.credited_runs(), delivery.counts_as_faced());
        }
        if delivery.swaps_strike() {
            next.swap_strike();
        }
    }

    if delivery.is_legal && next.innings[idx].at_over_boundary() {
        next.swap_strike();
        next.bowler_id = None;
        debug!(
            match_id = %next.id,
            over = next.innings[idx].total_balls / crate::models::BALLS_PER_OVER,
            "over complete"
        );
    }

    if innings_should_close(&next, &next.innings[idx]) {
        prior.appended_innings = close_innings(&mut next, idx);
    }

    delivery.prior = Some(prior);
    next.innings[idx].deliveries.push(delivery);
    next.touch();
    next
}

/// Overs exhausted, or (outside Indoor) target reached or side all out.
fn innings_should_close(state: &Match, innings: &Innings) -> bool {
    if innings.overs_exhausted() {
        return true;
    }
    if state.is_indoor() {
        return false;
    }
    if innings.target_reached() {
        return true;
    }
    let squad = state.batting_squad_size();
    squad > 1 && innings.wickets as usize >= squad - 1
}

/// Mark innings `idx` completed. Returns true when this appended the second
/// innings.
fn close_innings(state: &mut Match, idx: usize) -> bool {
    let overs_limit = state.overs_limit;
    let innings = &mut state.innings[idx];
    innings.completed = true;
    let batting = innings.batting_team;
    let runs = innings.total_runs;

    info!(
        match_id = %state.id,
        innings = idx + 1,
        runs,
        wickets = state.innings[idx].wickets,
        overs = %state.innings[idx].overs_display(),
        "innings complete"
    );

    let mut appended = false;
    if idx == 0 && state.innings_count == 2 && state.innings.len() == 1 {
        state.innings.push(Innings::chasing(batting.opponent(), overs_limit, runs + 1));
        appended = true;
    }

    if idx + 1 >= state.innings_count as usize {
        state.status = MatchStatus::Completed;
        info!(match_id = %state.id, "match complete");
    }
    appended
}

/// Every batter has been out once: clear the out flags so the side bats
/// again in the same order. Returns the ids whose flag was cleared.
fn reset_indoor_cycle(state: &mut Match) -> Vec<String> {
    state.indoor_outs_in_cycle = 0;
    let Some(side) = state.batting_side() else {
        return Vec::new();
    };
    let mut cleared = Vec::new();
    for player in &mut state.team_mut(side).players {
        if player.is_out {
            player.is_out = false;
            cleared.push(player.id.clone());
        }
    }
    debug!(match_id = %state.id, batters = cleared.len(), "indoor batting cycle reset");
    cleared
}
