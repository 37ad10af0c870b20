//! Property tests over random delivery sequences.

use super::*;
use crate::models::{Delivery, DismissalType, Match, MatchFormat};
use crate::testkit::{bring_on_bowler, ready_match, same_state};
use proptest::prelude::*;

fn format_strategy() -> impl Strategy<Value = MatchFormat> {
    prop_oneof![Just(MatchFormat::Indoor), Just(MatchFormat::T20), Just(MatchFormat::Odi)]
}

fn dismissal_strategy() -> impl Strategy<Value = DismissalType> {
    prop_oneof![
        Just(DismissalType::Bowled),
        Just(DismissalType::Caught),
        Just(DismissalType::Lbw),
        Just(DismissalType::RunOut),
        Just(DismissalType::Stumped),
        Just(DismissalType::HitWicket),
        Just(DismissalType::Retired),
    ]
}

fn delivery_strategy() -> impl Strategy<Value = Delivery> {
    prop_oneof![
        4 => (0u32..=6).prop_map(Delivery::runs),
        1 => (0u32..=4).prop_map(Delivery::wide),
        1 => (0u32..=6).prop_map(Delivery::no_ball),
        1 => (1u32..=4).prop_map(Delivery::bye),
        1 => (1u32..=4).prop_map(Delivery::leg_bye),
        1 => dismissal_strategy().prop_map(Delivery::wicket),
        1 => (dismissal_strategy(), 1u32..=3)
            .prop_map(|(kind, runs)| Delivery::wicket(kind).with_runs(runs)),
        1 => Just(Delivery::wall_bonus()),
        1 => (0u32..=6, any::<bool>())
            .prop_map(|(runs, swap)| Delivery::runs(runs).with_rotation_override(swap)),
    ]
}

/// Fill an empty striker's end with the next batter (Indoor sides wrap
/// through their order) and make sure a bowler is on.
fn prepare(state: &Match) -> Match {
    let mut m = bring_on_bowler(state);
    if m.striker_id.is_none() {
        let next_in = next_indoor_batter(&m).or_else(|| {
            m.batting_team().and_then(|team| {
                team.players
                    .iter()
                    .find(|p| !p.is_out && Some(p.id.as_str()) != m.non_striker_id.as_deref())
                    .map(|p| p.id.clone())
            })
        });
        if let Some(id) = next_in {
            m = set_striker(&m, &id);
        }
    }
    m
}

fn setup(format: MatchFormat, squad: usize, overs: u32) -> Match {
    set_overs_limit(&ready_match(format, squad), Some(overs))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Undoing a delivery restores the snapshot it was applied to.
    #[test]
    fn prop_undo_restores_previous_state(
        format in format_strategy(),
        squad in 4usize..=8,
        overs in 1u32..=3,
        deliveries in prop::collection::vec(delivery_strategy(), 1..40)
    ) {
        let mut m = setup(format, squad, overs);
        for delivery in deliveries {
            let before = prepare(&m);
            let after = apply_delivery(&before, delivery);
            let idx = before.current_innings;
            if after.innings[idx].deliveries.len() > before.innings[idx].deliveries.len() {
                prop_assert!(same_state(&undo_last_delivery(&after), &before));
            }
            m = after;
        }
    }

    /// Undoing every delivery walks back to the starting snapshot.
    #[test]
    fn prop_full_undo_returns_to_start(
        format in format_strategy(),
        squad in 4usize..=8,
        deliveries in prop::collection::vec(delivery_strategy(), 1..30)
    ) {
        let base = setup(format, squad, 3);
        let mut m = base.clone();
        for delivery in deliveries {
            m = apply_delivery(&prepare(&m), delivery);
        }
        while !m.innings[0].deliveries.is_empty() {
            m = undo_last_delivery(&m);
        }
        prop_assert!(same_state(&m, &base));
    }

    /// Totals always agree with the delivery log.
    #[test]
    fn prop_totals_match_delivery_log(
        format in format_strategy(),
        squad in 4usize..=8,
        overs in 1u32..=3,
        deliveries in prop::collection::vec(delivery_strategy(), 1..60)
    ) {
        let mut m = setup(format, squad, overs);
        for delivery in deliveries {
            m = apply_delivery(&prepare(&m), delivery);
        }
        let penalty = format.wicket_penalty() as i64;
        for innings in &m.innings {
            let wickets = innings.deliveries.iter().filter(|d| d.is_wicket).count() as u32;
            let legal = innings.deliveries.iter().filter(|d| d.is_legal).count() as u32;
            prop_assert_eq!(innings.wickets, wickets);
            prop_assert_eq!(innings.total_balls, legal);
            prop_assert_eq!(
                innings.total_runs as i64,
                innings.delivery_runs() - penalty * wickets as i64
            );
            if let Some(max) = innings.max_balls() {
                prop_assert!(innings.total_balls <= max);
            }
        }
        if m.is_indoor() {
            prop_assert!(m.indoor_outs_in_cycle < m.batting_squad_size());
        }
    }
}
