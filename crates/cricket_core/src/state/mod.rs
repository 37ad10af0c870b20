//! Scoring Session
//!
//! [`ScoringSession`] owns the live [`Match`] for a host process. Commands
//! are applied through it so the format policy in use and the command log
//! stay with the match. It converts to and from [`MatchSave`] for
//! persistence.

use crate::analysis::MatchMetrics;
use crate::config::ScoringConfig;
use crate::engine::{self, ScoringCommand};
use crate::models::Match;
use crate::save::MatchSave;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ScoringSession {
    current: Match,
    config: ScoringConfig,
    /// Commands applied since the session was opened
    log: Vec<ScoringCommand>,
}

impl Default for ScoringSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringSession {
    /// Session over a fresh draft match with the built-in policy table
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default())
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { current: engine::create_new_match(), config, log: Vec::new() }
    }

    /// Resume scoring an existing match
    pub fn from_match(state: Match, config: ScoringConfig) -> Self {
        Self { current: state, config, log: Vec::new() }
    }

    pub fn current(&self) -> &Match {
        &self.current
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn commands(&self) -> &[ScoringCommand] {
        &self.log
    }

    pub fn into_match(self) -> Match {
        self.current
    }

    /// Apply one command and return the new snapshot.
    pub fn apply(&mut self, command: &ScoringCommand) -> &Match {
        let next = match command {
            ScoringCommand::SetFormat { format } => {
                engine::apply_format_with(&self.current, *format, &self.config)
            }
            ScoringCommand::SetOversLimit { overs } => {
                engine::set_overs_limit_with(&self.current, *overs, &self.config)
            }
            ScoringCommand::SetSquad { size } => {
                engine::set_squad_with(&self.current, *size, &self.config)
            }
            other => engine::apply_command(&self.current, other),
        };
        debug!(match_id = %next.id, ?command, "command applied");
        self.current = next;
        self.log.push(command.clone());
        &self.current
    }

    pub fn apply_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a ScoringCommand>) -> &Match {
        for command in commands {
            self.apply(command);
        }
        &self.current
    }

    pub fn undo(&mut self) -> &Match {
        self.apply(&ScoringCommand::Undo)
    }

    pub fn metrics(&self) -> MatchMetrics {
        MatchMetrics::from_match(&self.current)
    }

    pub fn to_save(&self) -> MatchSave {
        MatchSave::new(self.current.clone())
    }

    pub fn from_save(save: &MatchSave, config: ScoringConfig) -> Self {
        Self::from_match(save.state.clone(), config)
    }
}
