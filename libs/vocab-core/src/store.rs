//! Persistence and dictionary ports.
//!
//! The core never touches the filesystem directly. Callers supply a
//! [`DictionaryProvider`] for the entry set and a [`ProgressStore`] for the
//! per-entry learning state; [`MemoryStore`] covers tests and ephemeral
//! sessions.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{LearningState, VocabularyEntry};

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("corrupt record: {reason}")]
    Corrupt { reason: String },
}

/// Supplies the ordered vocabulary entry set, loaded once at startup.
pub trait DictionaryProvider {
    fn load_entries(&self) -> Result<Vec<VocabularyEntry>, StoreError>;
}

/// Durable per-entry learning state, keyed by entry id.
pub trait ProgressStore {
    fn load_state(&self, entry_id: &str) -> Result<Option<LearningState>, StoreError>;

    fn save_state(&mut self, entry_id: &str, state: &LearningState) -> Result<(), StoreError>;
}

impl<S: ProgressStore + ?Sized> ProgressStore for &mut S {
    fn load_state(&self, entry_id: &str) -> Result<Option<LearningState>, StoreError> {
        (**self).load_state(entry_id)
    }

    fn save_state(&mut self, entry_id: &str, state: &LearningState) -> Result<(), StoreError> {
        (**self).save_state(entry_id, state)
    }
}

/// Load a state, treating both an absent record and a failed read as "no
/// prior state". A failed load degrades scheduling quality but must not stop
/// a session; the error is returned alongside the default so the caller can
/// report it.
pub fn load_state_or_default<S: ProgressStore + ?Sized>(
    store: &S,
    entry_id: &str,
) -> (LearningState, Option<StoreError>) {
    match store.load_state(entry_id) {
        Ok(Some(state)) => (state.clamped(), None),
        Ok(None) => (LearningState::default(), None),
        Err(err) => (LearningState::default(), Some(err)),
    }
}

/// In-memory store. Never fails.
#[derive(Debug, Default)]
pub struct MemoryStore {
    states: HashMap<String, LearningState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn load_state(&self, entry_id: &str) -> Result<Option<LearningState>, StoreError> {
        Ok(self.states.get(entry_id).copied())
    }

    fn save_state(&mut self, entry_id: &str, state: &LearningState) -> Result<(), StoreError> {
        self.states.insert(entry_id.to_string(), *state);
        Ok(())
    }
}
