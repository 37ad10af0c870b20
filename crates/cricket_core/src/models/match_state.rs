//! The match aggregate: both rosters, the innings list and crease assignment.

use super::{Innings, MatchFormat, Player, Team, TeamSide, Toss};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Draft,
    Live,
    Completed,
    Abandoned,
    Deleted,
}

impl MatchStatus {
    /// Whether deliveries may still be recorded.
    pub fn is_scoreable(&self) -> bool {
        matches!(self, MatchStatus::Draft | MatchStatus::Live)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub team_a: Team,
    pub team_b: Team,
    pub format: MatchFormat,
    /// `None` = unlimited overs
    pub overs_limit: Option<u32>,
    pub innings_count: u8,
    /// Players per side
    pub squad_size: usize,
    pub current_innings: usize,
    pub innings: Vec<Innings>,

    // Crease
    pub striker_id: Option<String>,
    pub non_striker_id: Option<String>,
    pub bowler_id: Option<String>,

    #[serde(default)]
    pub toss: Option<Toss>,
    pub status: MatchStatus,

    // Indoor bookkeeping
    #[serde(default)]
    pub batting_order: Vec<String>,
    #[serde(default)]
    pub indoor_outs_in_cycle: usize,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::A => &mut self.team_a,
            TeamSide::B => &mut self.team_b,
        }
    }

    pub fn is_indoor(&self) -> bool {
        self.format.is_indoor()
    }

    pub fn active_innings(&self) -> Option<&Innings> {
        self.innings.get(self.current_innings)
    }

    pub fn active_innings_mut(&mut self) -> Option<&mut Innings> {
        self.innings.get_mut(self.current_innings)
    }

    pub fn batting_side(&self) -> Option<TeamSide> {
        self.active_innings().map(|inn| inn.batting_team)
    }

    pub fn batting_team(&self) -> Option<&Team> {
        self.batting_side().map(|side| self.team(side))
    }

    pub fn bowling_team(&self) -> Option<&Team> {
        self.batting_side().map(|side| self.team(side.opponent()))
    }

    /// Look up a player on either roster.
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.team_a.player(id).or_else(|| self.team_b.player(id))
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        if self.team_a.contains(id) {
            self.team_a.player_mut(id)
        } else {
            self.team_b.player_mut(id)
        }
    }

    pub fn player_name(&self, id: &str) -> Option<&str> {
        self.player(id).map(|p| p.name.as_str())
    }

    /// Striker, non-striker and bowler are all assigned.
    pub fn crease_ready(&self) -> bool {
        self.striker_id.is_some() && self.non_striker_id.is_some() && self.bowler_id.is_some()
    }

    /// Squad size used for all-out and the Indoor cycle: the batting roster
    /// once it is populated, the configured squad size before that.
    pub fn batting_squad_size(&self) -> usize {
        match self.batting_team() {
            Some(team) if !team.players.is_empty() => team.players.len(),
            _ => self.squad_size,
        }
    }

    pub fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker_id, &mut self.non_striker_id);
    }

    /// Match has at most its innings count and the last one is closed.
    pub fn is_finished(&self) -> bool {
        self.innings.len() >= self.innings_count as usize
            && self.innings.last().map(|inn| inn.completed).unwrap_or(false)
    }

    /// Bump the last-modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
