use super::error::SaveError;
use super::format::{decompress_and_deserialize, serialize_and_compress, MatchSave};
use super::migration::{migrate_save, needs_migration};
use crate::models::{Match, MatchStatus};

use chrono::{TimeZone, Utc};
use std::fs::{self, remove_file, rename, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const SAVE_EXTENSION: &str = "cms";

/// Match saves kept in one directory, one file per match id.
#[derive(Debug, Clone)]
pub struct SaveManager {
    dir: PathBuf,
}

impl SaveManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn match_path(&self, match_id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", match_id, SAVE_EXTENSION))
    }

    /// Save `state` under its id, replacing any earlier save.
    pub fn save_match(&self, state: &Match) -> Result<PathBuf, SaveError> {
        let path = self.match_path(&state.id);
        Self::save_to_path(&path, &MatchSave::new(state.clone()))?;
        log::info!("Match {} saved", state.id);
        Ok(path)
    }

    pub fn load_match(&self, match_id: &str) -> Result<Match, SaveError> {
        let save = Self::load_from_path(&self.match_path(match_id))?;
        log::info!("Match {} loaded", match_id);
        Ok(save.state)
    }

    pub fn exists(&self, match_id: &str) -> bool {
        self.match_path(match_id).exists()
    }

    pub fn delete(&self, match_id: &str) -> Result<(), SaveError> {
        let path = self.match_path(match_id);
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted save for match {}", match_id);
        }
        Ok(())
    }

    /// Summaries of every readable save, most recent first. Unreadable files
    /// are skipped with a warning.
    pub fn list(&self) -> Result<Vec<SaveInfo>, SaveError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut saves = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            match Self::load_from_path(&path) {
                Ok(save) => saves.push(SaveInfo::from_save(&save)),
                Err(e) => log::warn!("Skipping unreadable save {:?}: {}", path, e),
            }
        }

        saves.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(saves)
    }

    pub fn save_to_path(path: &Path, save: &MatchSave) -> Result<(), SaveError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let data = serialize_and_compress(save)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<MatchSave, SaveError> {
        if !path.exists() {
            return Err(SaveError::FileNotFound { path: path.display().to_string() });
        }

        let mut file = File::open(path)?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;

        let mut save = decompress_and_deserialize(&data)?;
        if needs_migration(&save) {
            save = migrate_save(save)?;
        }

        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(save)
    }
}

/// Save summary for match lists.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveInfo {
    pub match_id: String,
    pub saved_at: u64,
    pub status: MatchStatus,
    pub title: String,
}

impl SaveInfo {
    fn from_save(save: &MatchSave) -> Self {
        let state = &save.state;
        Self {
            match_id: state.id.clone(),
            saved_at: save.saved_at,
            status: state.status,
            title: format!("{} v {} ({})", state.team_a.name, state.team_b.name, state.format.code()),
        }
    }

    pub fn format_timestamp(&self) -> String {
        Utc.timestamp_millis_opt(self.saved_at as i64)
            .single()
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}
