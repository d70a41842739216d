//! Core scheduling and selection library for the vocabulary trainer.
//!
//! Provides:
//! - 5-box spaced repetition: urgency scoring and box transitions
//! - Distractor selection and choice-set assembly for multiple-choice rounds
//! - Persistence and dictionary ports, with an in-memory store
//! - A session controller driving the review loop
//!
//! The library is pure: the clock and the RNG are always parameters, and all
//! persistence goes through the [`store`] ports.

pub mod choices;
pub mod error;
pub mod leitner;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod types;

pub use choices::{sample_entries, select_distractors, ChoiceSet};
pub use error::{CoreError, Result};
pub use leitner::{apply_answer, interval_hours, MASTERY_BOX, MAX_BOX, MIN_BOX};
pub use scheduler::{score, select_next, urgency};
pub use session::{AnswerOutcome, Round, StudySession};
pub use store::{
    load_state_or_default, DictionaryProvider, MemoryStore, ProgressStore, StoreError,
};
pub use types::{
    mastery_percent, Category, LearningState, QuestionLanguage, Settings, TrackedEntry,
    VocabularyEntry, MAX_CHOICES, MIN_CHOICES,
};
