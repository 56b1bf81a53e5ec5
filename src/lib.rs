// src/lib.rs
// CineList - Client-side sync engine for paged movie catalog lists
//
// Architecture:
// - Domain-centric: entities and their invariants live in domain, everything
//   above validates against them
// - Port-driven: stores consume the CatalogSource trait, never a concrete
//   client, so the remote end is swappable and mockable
// - Optimistic: favorite mutations apply locally first and roll back on
//   failure
// - Explicit: no implicit behavior, every state transition is a named
//   operation

// ============================================================================
// CORE
// ============================================================================

pub mod domain;
pub mod error;
pub mod source;
pub mod store;

// ============================================================================
// INTEGRATIONS
// ============================================================================

pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Types
// ============================================================================

pub use domain::{
    validate_media_item,
    validate_page,
    DomainError,
    DomainResult,
    // Media
    MediaId,
    MediaItem,
    // Paging
    Page,
    // Query
    QueryMode,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{MutationError, SourceError, SourceResult};

// ============================================================================
// PUBLIC API - Source Port
// ============================================================================

pub use source::CatalogSource;

// ============================================================================
// PUBLIC API - Stores
// ============================================================================

pub use store::{CollectionSnapshot, FavoriteStore, PagedCollection};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{TmdbClient, TmdbConfig};
