//! Plain-text scorecard rendering.

use cricket_core::analysis::{
    batting_card, bowling_figures, fall_of_wickets, get_match_result, MatchMetrics,
};
use cricket_core::models::{Innings, Match};
use std::fmt::Write;

pub fn render_scorecard(state: &Match) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} v {} ({}, {:?})",
        state.team_a.name,
        state.team_b.name,
        state.format.code(),
        state.status
    );

    for (idx, innings) in state.innings.iter().enumerate() {
        if innings.deliveries.is_empty() && !innings.completed {
            continue;
        }
        out.push('\n');
        render_innings(&mut out, state, idx, innings);
    }

    out.push('\n');
    match get_match_result(state) {
        Some(result) => {
            let _ = writeln!(out, "{}", result.summary(state));
        }
        None => {
            let metrics = MatchMetrics::from_match(state);
            let _ = writeln!(out, "In progress: {}", metrics.score_line());
            if let Some(needed) = metrics.runs_required {
                let _ = write!(out, "Need {} to win", needed);
                if let Some(rrr) = metrics.required_run_rate {
                    let _ = write!(out, " (RRR {:.2})", rrr);
                }
                out.push('\n');
            }
        }
    }
    out
}

fn render_innings(out: &mut String, state: &Match, idx: usize, innings: &Innings) {
    let batting = &state.team(innings.batting_team).name;
    let _ = writeln!(
        out,
        "Innings {}: {} {}/{} ({} ov)",
        idx + 1,
        batting,
        innings.total_runs,
        innings.wickets,
        innings.overs_display()
    );
    if let Some(target) = innings.target {
        let _ = writeln!(out, "Target {}", target);
    }

    let _ = writeln!(out, "  {:<20} {:<24} {:>4} {:>4} {:>3} {:>3} {:>7}", "Batter", "", "R", "B", "4s", "6s", "SR");
    for line in batting_card(state, innings) {
        let how_out = line.how_out.clone().unwrap_or_else(|| "not out".to_string());
        let _ = writeln!(
            out,
            "  {:<20} {:<24} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            line.name,
            how_out,
            line.runs,
            line.balls,
            line.fours,
            line.sixes,
            line.strike_rate()
        );
    }

    let extras = &innings.extras;
    let _ = writeln!(
        out,
        "  Extras {} (wd {}, nb {}, b {}, lb {})",
        extras.total(),
        extras.wides,
        extras.no_balls,
        extras.byes,
        extras.leg_byes
    );

    let _ = writeln!(out, "  {:<20} {:>5} {:>3} {:>4} {:>3} {:>6}", "Bowler", "O", "M", "R", "W", "Econ");
    for fig in bowling_figures(state, innings) {
        let _ = writeln!(
            out,
            "  {:<20} {:>5} {:>3} {:>4} {:>3} {:>6.2}",
            fig.name,
            fig.overs(),
            fig.maidens,
            fig.runs_conceded,
            fig.wickets,
            fig.economy()
        );
    }

    let fow = fall_of_wickets(state, innings);
    if !fow.is_empty() {
        let entries: Vec<String> =
            fow.iter().map(|f| format!("{}-{} ({})", f.wicket, f.score, f.overs)).collect();
        let _ = writeln!(out, "  FoW: {}", entries.join(", "));
    }
}
