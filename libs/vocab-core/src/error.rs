//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by the scheduling and session layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The scheduler was invoked with no eligible candidates. This is a
    /// configuration error: callers must not exclude when only one entry
    /// exists, and the dictionary must not be empty.
    #[error("no entries available for review")]
    EmptyPool,

    #[error("choice count {value} outside allowed range 2..=6")]
    InvalidChoiceCount { value: u8 },

    #[error("answer id {id} is not one of the current round's choices")]
    UnknownChoice { id: String },

    #[error("no active round to answer")]
    NoActiveRound,
}
