//! Embedded starter dictionary.

use std::collections::HashSet;

use vocab_core::{DictionaryProvider, StoreError, VocabularyEntry};

const DICTIONARY_JSON: &str = include_str!("../data/dictionary.json");

/// Beginner English-Hebrew word set compiled into the binary.
pub struct EmbeddedDictionary;

impl DictionaryProvider for EmbeddedDictionary {
    fn load_entries(&self) -> Result<Vec<VocabularyEntry>, StoreError> {
        let entries: Vec<VocabularyEntry> =
            serde_json::from_str(DICTIONARY_JSON).map_err(|err| StoreError::Corrupt {
                reason: format!("embedded dictionary: {err}"),
            })?;

        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(StoreError::Corrupt {
                    reason: format!("duplicate entry id {}", entry.id),
                });
            }
        }
        Ok(entries)
    }
}
