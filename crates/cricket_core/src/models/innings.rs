use super::format::BALLS_PER_OVER;
use super::{Delivery, ExtraType, TeamSide};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Count of extras by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Extras {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
}

impl Extras {
    pub fn record(&mut self, extra: ExtraType) {
        if let Some(counter) = self.counter_mut(extra) {
            *counter += 1;
        }
    }

    pub fn unrecord(&mut self, extra: ExtraType) {
        if let Some(counter) = self.counter_mut(extra) {
            *counter = counter.saturating_sub(1);
        }
    }

    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes
    }

    fn counter_mut(&mut self, extra: ExtraType) -> Option<&mut u32> {
        match extra {
            ExtraType::None => None,
            ExtraType::Wide => Some(&mut self.wides),
            ExtraType::NoBall => Some(&mut self.no_balls),
            ExtraType::Bye => Some(&mut self.byes),
            ExtraType::LegBye => Some(&mut self.leg_byes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    pub batting_team: TeamSide,
    pub bowling_team: TeamSide,
    pub deliveries: Vec<Delivery>,
    /// Can go negative in Indoor matches (wicket penalties)
    pub total_runs: i32,
    pub wickets: u32,
    /// Legal deliveries only
    pub total_balls: u32,
    pub overs_limit: Option<u32>,
    #[serde(default)]
    pub target: Option<i32>,
    #[serde(default)]
    pub extras: Extras,
    pub completed: bool,
}

impl Innings {
    pub fn new(batting_team: TeamSide, overs_limit: Option<u32>) -> Self {
        Self {
            batting_team,
            bowling_team: batting_team.opponent(),
            deliveries: Vec::new(),
            total_runs: 0,
            wickets: 0,
            total_balls: 0,
            overs_limit,
            target: None,
            extras: Extras::default(),
            completed: false,
        }
    }

    /// Innings chasing `target`.
    pub fn chasing(batting_team: TeamSide, overs_limit: Option<u32>, target: i32) -> Self {
        Self { target: Some(target), ..Self::new(batting_team, overs_limit) }
    }

    pub fn set_batting_team(&mut self, side: TeamSide) {
        self.batting_team = side;
        self.bowling_team = side.opponent();
    }

    /// Legal-ball allowance, `None` when overs are unlimited.
    pub fn max_balls(&self) -> Option<u32> {
        self.overs_limit.map(|overs| overs * BALLS_PER_OVER)
    }

    pub fn balls_remaining(&self) -> Option<u32> {
        self.max_balls().map(|max| max.saturating_sub(self.total_balls))
    }

    pub fn overs_exhausted(&self) -> bool {
        matches!(self.max_balls(), Some(max) if self.total_balls >= max)
    }

    pub fn target_reached(&self) -> bool {
        matches!(self.target, Some(target) if self.total_runs >= target)
    }

    /// True when the last legal ball closed an over.
    pub fn at_over_boundary(&self) -> bool {
        self.total_balls > 0 && self.total_balls % BALLS_PER_OVER == 0
    }

    /// "overs.balls" notation, e.g. "12.3".
    pub fn overs_display(&self) -> String {
        overs_display(self.total_balls)
    }

    pub fn last_delivery(&self) -> Option<&Delivery> {
        self.deliveries.last()
    }

    /// Sum of runs over the delivery log (before any wicket penalties).
    pub fn delivery_runs(&self) -> i64 {
        self.deliveries.iter().map(|d| d.runs as i64).sum()
    }
}

pub fn overs_display(balls: u32) -> String {
    format!("{}.{}", balls / BALLS_PER_OVER, balls % BALLS_PER_OVER)
}
