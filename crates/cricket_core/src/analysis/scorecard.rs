//! Scorecard views rebuilt from the delivery log.

use crate::models::{overs_display, ExtraType, Innings, Match, BALLS_PER_OVER};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BattingLine {
    pub player_id: String,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub dismissals: u32,
    /// Latest dismissal in this innings, `None` while not out
    pub how_out: Option<String>,
}

impl BattingLine {
    pub fn strike_rate(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            self.runs as f64 * 100.0 / self.balls as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BowlerFigures {
    pub bowler_id: String,
    pub name: String,
    /// Legal balls bowled
    pub balls: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
    pub wides: u32,
    pub no_balls: u32,
    pub maidens: u32,
}

impl BowlerFigures {
    pub fn overs(&self) -> String {
        overs_display(self.balls)
    }

    pub fn economy(&self) -> f64 {
        if self.balls == 0 {
            0.0
        } else {
            self.runs_conceded as f64 / (self.balls as f64 / BALLS_PER_OVER as f64)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FallOfWicket {
    pub wicket: u32,
    pub score: i32,
    pub overs: String,
    pub batter_id: Option<String>,
}

/// Batting lines in order of first appearance. Batters at the crease who
/// have not faced yet are appended.
pub fn batting_card(state: &Match, innings: &Innings) -> Vec<BattingLine> {
    let mut order: Vec<String> = Vec::new();
    let mut lines: HashMap<String, BattingLine> = HashMap::new();

    let mut entry = |id: &str, order: &mut Vec<String>| -> String {
        if !lines.contains_key(id) {
            order.push(id.to_string());
            lines.insert(
                id.to_string(),
                BattingLine {
                    player_id: id.to_string(),
                    name: state.player_name(id).unwrap_or(id).to_string(),
                    runs: 0,
                    balls: 0,
                    fours: 0,
                    sixes: 0,
                    dismissals: 0,
                    how_out: None,
                },
            );
        }
        id.to_string()
    };

    let mut credits: Vec<(String, u32, bool, bool)> = Vec::new();
    for delivery in &innings.deliveries {
        let Some(batter) = delivery.batter_id.as_deref() else {
            continue;
        };
        let id = entry(batter, &mut order);
        credits.push((id, delivery.credited_runs(), delivery.counts_as_faced(), delivery.is_wicket));
    }
    let is_active = state.active_innings().map(|a| std::ptr::eq(a, innings)).unwrap_or(false);
    if is_active {
        for id in [state.striker_id.as_deref(), state.non_striker_id.as_deref()].into_iter().flatten() {
            entry(id, &mut order);
        }
    }

    for (id, runs, faced, wicket) in credits {
        let Some(line) = lines.get_mut(&id) else {
            continue;
        };
        if wicket {
            line.dismissals += 1;
            continue;
        }
        line.runs += runs;
        if faced {
            line.balls += 1;
        }
        match runs {
            4 => line.fours += 1,
            6 => line.sixes += 1,
            _ => {}
        }
    }

    order
        .into_iter()
        .filter_map(|id| lines.remove(&id))
        .map(|mut line| {
            if let Some(player) = state.player(&line.player_id) {
                if player.is_out || (state.is_indoor() && line.dismissals > 0) {
                    line.how_out = player.dismissal.clone();
                }
            }
            line
        })
        .collect()
}

/// Per-bowler analysis in order of first over bowled. Byes and leg-byes are
/// not charged to the bowler; run-outs and retirements are not credited.
pub fn bowling_figures(state: &Match, innings: &Innings) -> Vec<BowlerFigures> {
    let mut figures: Vec<BowlerFigures> = Vec::new();
    // (bowler, runs conceded, legal balls) for the over in progress
    let mut over: Option<(String, u32, u32)> = None;

    for delivery in &innings.deliveries {
        let Some(bowler) = delivery.bowler_id.as_deref() else {
            continue;
        };
        let idx = match figures.iter().position(|f| f.bowler_id == bowler) {
            Some(idx) => idx,
            None => {
                figures.push(BowlerFigures {
                    bowler_id: bowler.to_string(),
                    name: state.player_name(bowler).unwrap_or(bowler).to_string(),
                    balls: 0,
                    runs_conceded: 0,
                    wickets: 0,
                    wides: 0,
                    no_balls: 0,
                    maidens: 0,
                });
                figures.len() - 1
            }
        };

        let fig = &mut figures[idx];
        let conceded = delivery.runs_conceded();
        fig.runs_conceded += conceded;
        match delivery.extra_type {
            ExtraType::Wide => fig.wides += 1,
            ExtraType::NoBall => fig.no_balls += 1,
            _ => {}
        }
        if delivery.is_legal {
            fig.balls += 1;
        }
        if delivery.is_wicket && delivery.dismissal_type.map(|d| d.credits_bowler()).unwrap_or(true) {
            fig.wickets += 1;
        }

        let current = over.get_or_insert_with(|| (bowler.to_string(), 0, 0));
        if current.0 != bowler {
            *current = (bowler.to_string(), 0, 0);
        }
        current.1 += conceded;
        if delivery.is_legal {
            current.2 += 1;
        }
        if current.2 == BALLS_PER_OVER {
            if current.1 == 0 {
                fig.maidens += 1;
            }
            over = None;
        }
    }

    figures
}

/// Score and overs at the fall of each wicket.
pub fn fall_of_wickets(state: &Match, innings: &Innings) -> Vec<FallOfWicket> {
    let penalty = state.format.wicket_penalty();
    let mut score = 0i32;
    let mut balls = 0u32;
    let mut wickets = 0u32;
    let mut fall = Vec::new();

    for delivery in &innings.deliveries {
        score += delivery.runs as i32;
        if delivery.is_legal {
            balls += 1;
        }
        if delivery.is_wicket {
            score -= penalty;
            wickets += 1;
            fall.push(FallOfWicket {
                wicket: wickets,
                score,
                overs: overs_display(balls),
                batter_id: delivery.batter_id.clone(),
            });
        }
    }
    fall
}

/// Display strings of the over in progress; empty right after an over ends.
pub fn current_over(innings: &Innings) -> Vec<String> {
    let mut balls = Vec::new();
    let mut legal = 0u32;
    for delivery in &innings.deliveries {
        balls.push(delivery.display.clone());
        if delivery.is_legal {
            legal += 1;
            if legal % BALLS_PER_OVER == 0 {
                balls.clear();
            }
        }
    }
    balls
}
