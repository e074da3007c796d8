//! File-backed max score store (native)

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ScoreStore, encode_max_score, parse_max_score};

/// Stores the max score as a JSON number in a single file
///
/// Writes go to a sibling `.tmp` file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ScoreStore for JsonFileStore {
    fn load_max_score(&self) -> Option<u32> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => parse_max_score(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No max score at {}, starting fresh", self.path.display());
                None
            }
            Err(e) => {
                log::warn!("Cannot read max score {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save_max_score(&mut self, score: u32) {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::warn!("Cannot create {}: {}", parent.display(), e);
                return;
            }
        }

        let tmp = self.tmp_path();
        let result = std::fs::write(&tmp, encode_max_score(score))
            .and_then(|_| std::fs::rename(&tmp, &self.path));
        match result {
            Ok(()) => log::info!("Max score {} saved to {}", score, self.path.display()),
            Err(e) => log::warn!("Cannot save max score to {}: {}", self.path.display(), e),
        }
    }
}
