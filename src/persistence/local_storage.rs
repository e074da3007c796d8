//! Browser LocalStorage max score store (wasm32)

use super::{MAX_SCORE_KEY, ScoreStore, encode_max_score, parse_max_score};

/// Stores the max score under a LocalStorage key
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(MAX_SCORE_KEY)
    }
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_max_score(&self) -> Option<u32> {
        let storage = Self::storage()?;
        match storage.get_item(&self.key) {
            Ok(Some(raw)) => parse_max_score(&raw),
            Ok(None) => {
                log::info!("No max score stored, starting fresh");
                None
            }
            Err(_) => {
                log::warn!("LocalStorage read failed for {}", self.key);
                None
            }
        }
    }

    fn save_max_score(&mut self, score: u32) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, max score not saved");
            return;
        };
        if storage.set_item(&self.key, &encode_max_score(score)).is_ok() {
            log::info!("Max score {} saved", score);
        } else {
            log::warn!("LocalStorage write failed for {}", self.key);
        }
    }
}
