// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

use crate::domain::{DomainError, MediaId};

/// Failures surfaced by a catalog source operation
///
/// Fetches produce `Transport` and `Decode`; the favorite mutation may also
/// be refused outright (`Rejected`). Nothing here is fatal to the process:
/// every variant is local to one request, and the failed operation can simply
/// be re-invoked.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Rejected by server (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

impl SourceError {
    /// Whether re-issuing the identical request can reasonably succeed
    ///
    /// Decode failures need a fixed payload and rejections need a different
    /// request; only transport hiccups clear up on their own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::Transport(_))
    }
}

impl Serialize for SourceError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Transport(err.to_string())
        }
    }
}

impl From<DomainError> for SourceError {
    fn from(err: DomainError) -> Self {
        // A payload that violates domain invariants is malformed, no matter
        // how cleanly it deserialized.
        SourceError::Decode(err.to_string())
    }
}

/// A favorite toggle that failed after its optimistic application
///
/// By the time this error reaches the caller the local rollback has already
/// been applied; the caller only needs to revert its own affordance.
#[derive(Debug, Clone, Error)]
#[error("Favorite update for media {media_id} failed and was rolled back: {source}")]
pub struct MutationError {
    /// The item whose favorite flag was being toggled
    pub media_id: MediaId,

    /// The underlying source failure
    #[source]
    pub source: SourceError,
}

/// Result type for catalog source operations
pub type SourceResult<T> = Result<T, SourceError>;
