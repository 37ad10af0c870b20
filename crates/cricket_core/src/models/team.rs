use super::Player;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which of the two sides in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Toss {
    pub winner: TeamSide,
    pub decision: TossDecision,
}

impl Toss {
    /// Side that bats first.
    pub fn batting_first(&self) -> TeamSide {
        match self.decision {
            TossDecision::Bat => self.winner,
            TossDecision::Bowl => self.winner.opponent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    #[serde(default)]
    pub substitutes: Vec<Player>,
    #[serde(default)]
    pub captain_id: Option<String>,
    #[serde(default)]
    pub keeper_id: Option<String>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: Vec::new(),
            substitutes: Vec::new(),
            captain_id: None,
            keeper_id: None,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    pub fn out_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_out).count()
    }

    /// Drop players beyond `size` (moving nobody to substitutes) and clear
    /// captain/keeper designations that pointed at removed players.
    pub fn truncate_squad(&mut self, size: usize) {
        if self.players.len() <= size {
            return;
        }
        self.players.truncate(size);
        if let Some(id) = &self.captain_id {
            if !self.contains(id) {
                self.captain_id = None;
            }
        }
        if let Some(id) = &self.keeper_id {
            if !self.contains(id) {
                self.keeper_id = None;
            }
        }
    }

    /// Returns false when `id` is not on the roster.
    pub fn set_captain(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        for p in &mut self.players {
            p.is_captain = p.id == id;
        }
        self.captain_id = Some(id.to_string());
        true
    }

    /// Returns false when `id` is not on the roster.
    pub fn set_keeper(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        for p in &mut self.players {
            p.is_keeper = p.id == id;
        }
        self.keeper_id = Some(id.to_string());
        true
    }

    pub fn reset_batting(&mut self) {
        for p in &mut self.players {
            p.reset_batting();
        }
    }
}
