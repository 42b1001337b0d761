//! Storage layer (flat key-value store).
//!
//! The tracker only needs `get`/`set`/`remove` of string values, the same
//! surface as browser local storage.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys as constants.
pub mod keys {
    /// JSON array of all workouts.
    pub const WORKOUTS: &str = "workouts";
}

/// A flat string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

/// Errors from the key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}
