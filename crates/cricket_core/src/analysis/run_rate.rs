use crate::models::{Innings, BALLS_PER_OVER};

/// Runs per over so far; 0 before the first legal ball.
pub fn current_run_rate(innings: &Innings) -> f64 {
    if innings.total_balls == 0 {
        return 0.0;
    }
    innings.total_runs as f64 / overs(innings.total_balls)
}

/// Runs per over needed to reach the target with the legal balls left.
///
/// `None` without a target or an overs limit, once the target is met, or
/// once the overs are exhausted.
pub fn required_run_rate(innings: &Innings) -> Option<f64> {
    let needed = runs_required(innings)?;
    let remaining = innings.balls_remaining()?;
    if remaining == 0 {
        return None;
    }
    Some(needed as f64 / overs(remaining))
}

/// Runs still needed to reach the target, `None` once met or without one.
pub fn runs_required(innings: &Innings) -> Option<i32> {
    let target = innings.target?;
    let needed = target - innings.total_runs;
    (needed > 0).then_some(needed)
}

/// Current run rate extended over the full overs allowance.
pub fn projected_score(innings: &Innings) -> Option<f64> {
    let limit = innings.overs_limit?;
    if innings.total_balls == 0 {
        return None;
    }
    Some(current_run_rate(innings) * limit as f64)
}

fn overs(balls: u32) -> f64 {
    balls as f64 / BALLS_PER_OVER as f64
}
