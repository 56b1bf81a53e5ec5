// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod media;
pub mod page;
pub mod query;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Media Domain
pub use media::{validate_media_item, MediaId, MediaItem};

// Page Domain
pub use page::{validate_page, Page};

// Query Domain
pub use query::QueryMode;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of the data rules a well-formed source upholds
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
