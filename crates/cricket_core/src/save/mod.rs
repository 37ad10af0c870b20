// Match save files
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::SaveError;
pub use format::{decompress_and_deserialize, serialize_and_compress, MatchSave};
pub use manager::SaveManager;
pub use migration::{migrate_save, needs_migration};

pub const SAVE_VERSION: u32 = 1;
