use super::error::SaveError;
use super::format::MatchSave;
use super::SAVE_VERSION;
use crate::engine::lifecycle::rebuild_batting_order;
use crate::models::{Innings, TeamSide};

/// Migrate save data from older versions to current version
pub fn migrate_save(mut save: MatchSave) -> Result<MatchSave, SaveError> {
    let original_version = save.version;

    save = match save.version {
        0 => migrate_v0_to_v1(save),
        1 => save,
        v if v > SAVE_VERSION => {
            log::warn!("Loading save from future version {} (current: {})", v, SAVE_VERSION);
            save
        }
        _ => {
            return Err(SaveError::VersionMismatch { found: save.version, expected: SAVE_VERSION });
        }
    };

    if original_version != SAVE_VERSION {
        save.version = SAVE_VERSION;
        save.update_timestamp();
        log::info!("Migrated save from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(save)
}

/// Version 0 saves predate per-match innings counts and the stored Indoor
/// batting order.
fn migrate_v0_to_v1(mut save: MatchSave) -> MatchSave {
    log::info!("Migrating save from version 0 to 1");
    let state = &mut save.state;
    let policy = state.format.policy();

    if state.innings_count == 0 {
        state.innings_count = policy.innings_count;
    }

    if state.innings.is_empty() {
        state.innings.push(Innings::new(TeamSide::A, state.overs_limit));
    }
    if state.current_innings >= state.innings.len() {
        log::warn!(
            "Current innings {} out of range, clamping to {}",
            state.current_innings,
            state.innings.len() - 1
        );
        state.current_innings = state.innings.len() - 1;
    }

    if state.is_indoor() && state.batting_order.is_empty() {
        rebuild_batting_order(state);
    }

    save
}

pub fn needs_migration(save: &MatchSave) -> bool {
    save.version < SAVE_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::create_new_match;
    use crate::models::MatchFormat;
    use crate::testkit::ready_match;

    #[test]
    fn test_migrate_v0_to_v1() {
        let mut state = ready_match(MatchFormat::Indoor, 6);
        state.innings_count = 0;
        state.current_innings = 4;
        state.batting_order.clear();
        let mut save = MatchSave::new(state);
        save.version = 0;
        assert!(needs_migration(&save));

        let migrated = migrate_save(save).unwrap();
        assert_eq!(migrated.version, SAVE_VERSION);
        assert_eq!(migrated.state.innings_count, 2);
        assert_eq!(migrated.state.current_innings, 0);
        assert_eq!(migrated.state.batting_order, vec!["a0", "a1", "a2", "a3", "a4", "a5"]);
    }

    #[test]
    fn test_no_migration_needed() {
        let save = MatchSave::new(create_new_match());
        let result = migrate_save(save.clone()).unwrap();
        assert_eq!(result, save);
    }

    #[test]
    fn test_future_version_warning() {
        let mut save = MatchSave::new(create_new_match());
        save.version = 999;
        let result = migrate_save(save).unwrap();
        assert_eq!(result.version, SAVE_VERSION);
    }
}
