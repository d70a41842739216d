//! JSON-file persistence for progress and settings.
//!
//! The progress store is one JSON object per file, mapping entry id to its
//! learning state record. The file is read fully when the store opens and
//! rewritten atomically (temp file + rename) after every saved answer, so a
//! reload mid-session reflects the latest state.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use vocab_core::{LearningState, ProgressStore, Settings, StoreError};

pub struct JsonProgressStore {
    path: PathBuf,
    states: HashMap<String, LearningState>,
}

impl JsonProgressStore {
    /// Open the store, reading any existing progress file. An unreadable or
    /// corrupt file is treated as empty: scheduling starts fresh rather than
    /// blocking the session.
    pub fn open(path: PathBuf) -> Self {
        let states = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        path = %path.display(),
                        "corrupt progress file, starting fresh"
                    );
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %path.display(),
                    "could not read progress file, starting fresh"
                );
                HashMap::new()
            }
        };
        Self { path, states }
    }

    fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.states).map_err(|err| {
            StoreError::Corrupt {
                reason: err.to_string(),
            }
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|err| StoreError::Unavailable {
                reason: err.to_string(),
            })
    }
}

impl ProgressStore for JsonProgressStore {
    fn load_state(&self, entry_id: &str) -> Result<Option<LearningState>, StoreError> {
        Ok(self.states.get(entry_id).copied())
    }

    fn save_state(&mut self, entry_id: &str, state: &LearningState) -> Result<(), StoreError> {
        self.states.insert(entry_id.to_string(), *state);
        self.persist()
    }
}

/// Read settings from the given file, falling back to defaults when the file
/// is missing or unreadable.
pub fn load_settings(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(error = %err, "corrupt settings file, using defaults");
                Settings::default()
            }
        },
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                tracing::warn!(error = %err, "could not read settings file, using defaults");
            }
            Settings::default()
        }
    }
}

/// Write settings to the given file.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(settings).map_err(|err| StoreError::Corrupt {
        reason: err.to_string(),
    })?;
    fs::write(path, json).map_err(|err| StoreError::Unavailable {
        reason: err.to_string(),
    })
}
