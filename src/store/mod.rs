//! Local key-value persistence for progression and theme selection.

use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

pub const HIGH_SCORE_KEY: &str = "wordgrid_highScore";
pub const XP_KEY: &str = "wordgrid_xp";
pub const LEVEL_KEY: &str = "wordgrid_level";
pub const THEME_KEY: &str = "wordgrid_theme";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not a JSON object of strings: {0}")]
    Format(#[from] serde_json::Error),
}

/// String key-value store. Values are written as plain strings; callers own
/// the encoding.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
