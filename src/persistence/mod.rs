//! Max score persistence
//!
//! The only persisted value is a single integer, stored as a bare JSON number
//! under one key. Absent or malformed data reads as "no score yet".
//!
//! Backends:
//! - `MemoryStore`: in-process, for tests and hosts that persist elsewhere
//! - `JsonFileStore`: a file on disk (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Storage key shared by all backends
pub const MAX_SCORE_KEY: &str = "maxScore";

/// Key-value collaborator holding the best score
pub trait ScoreStore {
    /// Stored best score, `None` if absent or unreadable
    fn load_max_score(&self) -> Option<u32>;

    /// Persist a new best score; failures are logged, not returned
    fn save_max_score(&mut self, score: u32);
}

/// Parse a stored max score record
pub fn parse_max_score(raw: &str) -> Option<u32> {
    match serde_json::from_str::<u32>(raw.trim()) {
        Ok(score) => Some(score),
        Err(e) => {
            log::warn!("Ignoring malformed max score {:?}: {}", raw, e);
            None
        }
    }
}

/// Encode a max score record
pub fn encode_max_score(score: u32) -> String {
    // A u32 always serializes
    serde_json::to_string(&score).unwrap_or_else(|_| score.to_string())
}

/// Non-persistent store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u32) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }

    /// Number of save calls so far
    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl ScoreStore for MemoryStore {
    fn load_max_score(&self) -> Option<u32> {
        self.value
    }

    fn save_max_score(&mut self, score: u32) {
        self.value = Some(score);
        self.saves += 1;
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load_max_score(&self) -> Option<u32> {
        (**self).load_max_score()
    }

    fn save_max_score(&mut self, score: u32) {
        (**self).save_max_score(score)
    }
}
