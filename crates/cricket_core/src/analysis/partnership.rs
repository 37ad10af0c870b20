use crate::models::{Match, BALLS_PER_OVER};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Runs and legal balls added by the two batters currently at the crease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Partnership {
    pub striker_id: String,
    pub non_striker_id: String,
    /// All runs scored while the pair batted, extras included
    pub runs: u32,
    pub balls: u32,
    /// Runs off the bat for the current striker
    pub striker_runs: u32,
    /// Runs off the bat for the current non-striker
    pub non_striker_runs: u32,
}

/// Walk the active innings backward from the last ball, undoing strike
/// changes the way forward scoring made them, until a wicket or a ball faced
/// by someone outside the current pair.
///
/// `None` when either crease slot is empty.
pub fn get_partnership(state: &Match) -> Option<Partnership> {
    let striker = state.striker_id.clone()?;
    let non_striker = state.non_striker_id.clone()?;
    let innings = state.active_innings()?;

    let legal_after: Vec<u32> = innings
        .deliveries
        .iter()
        .scan(0u32, |legal, d| {
            if d.is_legal {
                *legal += 1;
            }
            Some(*legal)
        })
        .collect();

    let mut partnership = Partnership {
        striker_id: striker.clone(),
        non_striker_id: non_striker.clone(),
        runs: 0,
        balls: 0,
        striker_runs: 0,
        non_striker_runs: 0,
    };
    let (mut on_strike, mut off_strike) = (striker, non_striker);

    for (i, delivery) in innings.deliveries.iter().enumerate().rev() {
        if delivery.is_wicket {
            break;
        }
        if delivery.is_legal && legal_after[i] % BALLS_PER_OVER == 0 {
            std::mem::swap(&mut on_strike, &mut off_strike);
        }
        if delivery.swaps_strike() {
            std::mem::swap(&mut on_strike, &mut off_strike);
        }
        if let Some(batter) = &delivery.batter_id {
            if *batter != on_strike {
                break;
            }
        }

        partnership.runs += delivery.runs;
        if delivery.is_legal {
            partnership.balls += 1;
        }
        if on_strike == partnership.striker_id {
            partnership.striker_runs += delivery.credited_runs();
        } else {
            partnership.non_striker_runs += delivery.credited_runs();
        }
    }

    Some(partnership)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{apply_delivery, set_striker};
    use crate::models::{Delivery, DismissalType, MatchFormat};
    use crate::testkit::{bowl_all, ready_match};

    #[test]
    fn test_partnership_since_last_wicket() {
        let m = ready_match(MatchFormat::T20, 11);
        let m = bowl_all(&m, vec![Delivery::runs(4), Delivery::wicket(DismissalType::Bowled)]);
        let m = set_striker(&m, "a2");
        let m = bowl_all(&m, vec![Delivery::runs(1), Delivery::runs(2), Delivery::wide(0)]);

        let p = get_partnership(&m).unwrap();
        assert_eq!(p.runs, 4);
        assert_eq!(p.balls, 2);
        assert_eq!(p.striker_id, "a1");
        assert_eq!(p.striker_runs, 2);
        assert_eq!(p.non_striker_runs, 1);
    }

    #[test]
    fn test_partnership_across_over_boundary() {
        let m = ready_match(MatchFormat::T20, 11);
        let m = bowl_all(
            &m,
            vec![
                Delivery::runs(1),
                Delivery::runs(0),
                Delivery::runs(0),
                Delivery::runs(0),
                Delivery::runs(0),
                Delivery::runs(3),
                Delivery::runs(2),
            ],
        );
        let p = get_partnership(&m).unwrap();
        assert_eq!(p.runs, 6);
        assert_eq!(p.balls, 7);
        assert_eq!(p.striker_runs + p.non_striker_runs, 6);
        let a0 = m.team_a.player("a0").unwrap().runs;
        let a1 = m.team_a.player("a1").unwrap().runs;
        let (striker_expected, non_expected) =
            if p.striker_id == "a0" { (a0, a1) } else { (a1, a0) };
        assert_eq!(p.striker_runs, striker_expected);
        assert_eq!(p.non_striker_runs, non_expected);
    }

    #[test]
    fn test_partnership_stops_at_pair_change() {
        let m = ready_match(MatchFormat::Indoor, 8);
        let m = apply_delivery(&m, Delivery::runs(2));
        // Scorer retires a0 hurt and sends in a5 without a dismissal ball
        let m = set_striker(&m, "a5");
        let m = apply_delivery(&m, Delivery::runs(4));
        let p = get_partnership(&m).unwrap();
        assert_eq!(p.runs, 4);
        assert_eq!(p.balls, 1);
    }

    #[test]
    fn test_no_partnership_with_empty_crease() {
        let m = ready_match(MatchFormat::T20, 11);
        let m = apply_delivery(&m, Delivery::wicket(DismissalType::Lbw));
        assert_eq!(get_partnership(&m), None);
    }
}
