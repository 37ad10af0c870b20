use super::error::SaveError;
use super::SAVE_VERSION;
use crate::models::Match;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

const CHECKSUM_LEN: usize = 32;

/// One saved match.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchSave {
    /// Save format version for migration
    pub version: u32,

    /// Save timestamp (unix milliseconds)
    pub saved_at: u64,

    pub state: Match,
}

impl MatchSave {
    pub fn new(state: Match) -> Self {
        Self { version: SAVE_VERSION, saved_at: current_timestamp(), state }
    }

    pub fn update_timestamp(&mut self) {
        self.saved_at = current_timestamp();
    }

    pub fn validate(&self) -> Result<(), SaveError> {
        let state = &self.state;
        if state.id.is_empty() {
            return Err(SaveError::Corrupted("match id is empty".to_string()));
        }
        if state.current_innings >= state.innings.len() {
            return Err(SaveError::Corrupted(format!(
                "current innings {} out of range ({} innings)",
                state.current_innings,
                state.innings.len()
            )));
        }

        let mut player_ids = HashSet::new();
        for team in [&state.team_a, &state.team_b] {
            for player in team.players.iter().chain(team.substitutes.iter()) {
                if !player_ids.insert(player.id.as_str()) {
                    return Err(SaveError::Corrupted(format!("duplicate player id {}", player.id)));
                }
            }
        }

        Ok(())
    }
}

/// Serialize and compress a match save
pub fn serialize_and_compress(save: &MatchSave) -> Result<Vec<u8>, SaveError> {
    save.validate()?;

    let msgpack = to_vec_named(save)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut result = compressed;
    result.extend_from_slice(&checksum);
    Ok(result)
}

/// Decompress and deserialize a match save
pub fn decompress_and_deserialize(bytes: &[u8]) -> Result<MatchSave, SaveError> {
    // size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(SaveError::Corrupted(format!("file too short ({} bytes)", bytes.len())));
    }

    let (payload, checksum_bytes) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    let calculated_checksum = hasher.finalize();
    if &calculated_checksum[..] != checksum_bytes {
        return Err(SaveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| SaveError::Decompression)?;
    let save: MatchSave = from_slice(&msgpack)?;

    if save.version > SAVE_VERSION {
        return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
    }

    Ok(save)
}

pub fn current_timestamp() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}
