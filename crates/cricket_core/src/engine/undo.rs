//! Inverse of the delivery transition.

use crate::models::{Delivery, Match};
use tracing::debug;

/// Remove the last delivery of the active innings and reverse its effects.
///
/// Scoring totals, extras, the ball clock and batter figures are always
/// reversed. Crease assignment, the Indoor cycle, innings completion and
/// match status are restored only when the delivery carries the
/// [`PriorState`](crate::models::PriorState) stamped by `apply_delivery`.
pub fn undo_last_delivery(state: &Match) -> Match {
    let idx = state.current_innings;
    let has_delivery = state.innings.get(idx).map(|inn| !inn.deliveries.is_empty()).unwrap_or(false);
    if !has_delivery {
        return state.clone();
    }

    let mut next = state.clone();
    let Some(delivery) = next.innings[idx].deliveries.pop() else {
        return next;
    };
    let format = next.format;

    {
        let innings = &mut next.innings[idx];
        innings.total_runs -= delivery.runs as i32;
        innings.extras.unrecord(delivery.extra_type);
        if delivery.is_legal {
            innings.total_balls = innings.total_balls.saturating_sub(1);
        }
        if delivery.is_wicket {
            innings.wickets = innings.wickets.saturating_sub(1);
            innings.total_runs += format.wicket_penalty();
        }
    }

    let batter_id = delivery
        .batter_id
        .clone()
        .or_else(|| delivery.prior.as_ref().and_then(|p| p.striker_id.clone()));

    if delivery.is_wicket {
        reverse_wicket(&mut next, &delivery, batter_id.as_deref());
    } else if let Some(batter) = batter_id.as_deref().and_then(|id| next.player_mut(id)) {
        batter.uncredit(delivery.credited_runs(), delivery.counts_as_faced());
    }

    if let Some(prior) = &delivery.prior {
        next.striker_id = prior.striker_id.clone();
        next.non_striker_id = prior.non_striker_id.clone();
        next.bowler_id = prior.bowler_id.clone();
        next.status = prior.status;
        next.indoor_outs_in_cycle = prior.indoor_outs_in_cycle;
        next.innings[idx].completed = false;

        let appended_untouched = next
            .innings
            .get(idx + 1)
            .map(|inn| inn.deliveries.is_empty())
            .unwrap_or(false);
        if prior.appended_innings && appended_untouched && next.innings.len() == idx + 2 {
            next.innings.pop();
        }
    }

    debug!(
        match_id = %next.id,
        innings = idx + 1,
        remaining = next.innings[idx].deliveries.len(),
        "delivery undone"
    );
    next.touch();
    next
}

fn reverse_wicket(state: &mut Match, delivery: &Delivery, batter_id: Option<&str>) {
    let indoor = state.is_indoor();

    if let Some(prior) = &delivery.prior {
        for id in &prior.cycle_reset_ids {
            if let Some(player) = state.player_mut(id) {
                player.is_out = true;
            }
        }
    } else if indoor {
        state.indoor_outs_in_cycle = state.indoor_outs_in_cycle.saturating_sub(1);
    }

    let Some(batter) = batter_id.and_then(|id| state.player_mut(id)) else {
        return;
    };
    batter.is_out = delivery.prior.as_ref().map(|p| p.batter_was_out).unwrap_or(false);
    batter.dismissal = delivery.prior.as_ref().and_then(|p| p.dismissal_before.clone());
    if indoor {
        batter.outs_count = batter.outs_count.saturating_sub(1);
    }
}
