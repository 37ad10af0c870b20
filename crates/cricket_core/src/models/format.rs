//! Match formats and their built-in policy table.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Legal deliveries per over.
pub const BALLS_PER_OVER: u32 = 6;

/// Runs deducted from the batting side for every Indoor dismissal.
pub const INDOOR_WICKET_PENALTY: i32 = 3;

/// Automatic run awarded for a wide or a no-ball.
pub const ILLEGAL_BALL_PENALTY: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchFormat {
    /// Eight-a-side netted-court variant with wicket penalties and re-batting.
    #[default]
    Indoor,
    T20,
    Odi,
}

impl MatchFormat {
    pub const ALL: [MatchFormat; 3] = [MatchFormat::Indoor, MatchFormat::T20, MatchFormat::Odi];

    pub fn is_indoor(&self) -> bool {
        matches!(self, MatchFormat::Indoor)
    }

    /// Runs a dismissal costs the batting side.
    pub fn wicket_penalty(&self) -> i32 {
        match self {
            MatchFormat::Indoor => INDOOR_WICKET_PENALTY,
            MatchFormat::T20 | MatchFormat::Odi => 0,
        }
    }

    /// Built-in policy for this format.
    pub fn policy(&self) -> FormatPolicy {
        FormatPolicy::builtin(*self)
    }

    pub fn code(&self) -> &'static str {
        match self {
            MatchFormat::Indoor => "INDOOR",
            MatchFormat::T20 => "T20",
            MatchFormat::Odi => "ODI",
        }
    }
}

impl std::str::FromStr for MatchFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INDOOR" => Ok(MatchFormat::Indoor),
            "T20" => Ok(MatchFormat::T20),
            "ODI" => Ok(MatchFormat::Odi),
            other => Err(format!("Unknown match format: {}", other)),
        }
    }
}

/// Per-format constants and constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormatPolicy {
    /// Default overs per innings (`None` = unlimited)
    pub overs_limit: Option<u32>,
    /// Innings per match (1 or 2)
    pub innings_count: u8,
    pub min_overs: u32,
    pub max_overs: u32,
    pub min_squad: usize,
    pub max_squad: usize,
    /// Squad size used when a match is first switched to this format
    pub default_squad: usize,
}

impl FormatPolicy {
    pub fn builtin(format: MatchFormat) -> Self {
        match format {
            MatchFormat::Indoor => Self {
                overs_limit: Some(16),
                innings_count: 2,
                min_overs: 1,
                max_overs: 20,
                min_squad: 4,
                max_squad: 8,
                default_squad: 8,
            },
            MatchFormat::T20 => Self {
                overs_limit: Some(20),
                innings_count: 2,
                min_overs: 1,
                max_overs: 20,
                min_squad: 2,
                max_squad: 11,
                default_squad: 11,
            },
            MatchFormat::Odi => Self {
                overs_limit: Some(50),
                innings_count: 2,
                min_overs: 1,
                max_overs: 50,
                min_squad: 2,
                max_squad: 11,
                default_squad: 11,
            },
        }
    }

    pub fn clamp_overs(&self, overs: u32) -> u32 {
        overs.clamp(self.min_overs, self.max_overs)
    }

    pub fn clamp_squad(&self, squad: usize) -> usize {
        squad.clamp(self.min_squad, self.max_squad)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(1..=2).contains(&self.innings_count) {
            return Err(format!("innings_count must be 1 or 2, got {}", self.innings_count));
        }
        if self.min_overs == 0 || self.min_overs > self.max_overs {
            return Err(format!(
                "invalid overs bounds: {}..={}",
                self.min_overs, self.max_overs
            ));
        }
        if let Some(overs) = self.overs_limit {
            if overs < self.min_overs || overs > self.max_overs {
                return Err(format!(
                    "default overs {} outside {}..={}",
                    overs, self.min_overs, self.max_overs
                ));
            }
        }
        if self.min_squad < 2 || self.min_squad > self.max_squad {
            return Err(format!(
                "invalid squad bounds: {}..={}",
                self.min_squad, self.max_squad
            ));
        }
        if self.default_squad < self.min_squad || self.default_squad > self.max_squad {
            return Err(format!(
                "default squad {} outside {}..={}",
                self.default_squad, self.min_squad, self.max_squad
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_policies_are_valid() {
        for format in MatchFormat::ALL {
            assert!(format.policy().validate().is_ok(), "{:?}", format);
        }
    }

    #[test]
    fn test_only_indoor_penalises_wickets() {
        assert_eq!(MatchFormat::Indoor.wicket_penalty(), 3);
        assert_eq!(MatchFormat::T20.wicket_penalty(), 0);
        assert_eq!(MatchFormat::Odi.wicket_penalty(), 0);
    }

    #[test]
    fn test_format_serde_codes() {
        assert_eq!(serde_json::to_string(&MatchFormat::Odi).unwrap(), "\"ODI\"");
        assert_eq!(serde_json::to_string(&MatchFormat::Indoor).unwrap(), "\"INDOOR\"");
        assert_eq!("t20".parse::<MatchFormat>().unwrap(), MatchFormat::T20);
        assert!("test".parse::<MatchFormat>().is_err());
    }

    #[test]
    fn test_clamping() {
        let indoor = MatchFormat::Indoor.policy();
        assert_eq!(indoor.clamp_squad(11), 8);
        assert_eq!(indoor.clamp_squad(1), 4);
        assert_eq!(indoor.clamp_overs(40), 20);
        assert_eq!(indoor.clamp_overs(0), 1);
    }
}
