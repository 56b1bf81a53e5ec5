// src/source/catalog_source.rs
//
// The consumed remote capability.
//
// Everything the sync stores know about the network fits in this trait: one
// paged listing fetch, one paged favorites fetch, one favorite mutation.
// Implementations own transport concerns (endpoints, timeouts, wire shapes);
// the stores own all state.

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::{MediaId, Page, QueryMode};
use crate::error::SourceResult;

/// Remote source of paged catalog listings
///
/// Stateless request/response capability; a single instance may be shared by
/// any number of stores as `Arc<dyn CatalogSource>`. Failures are always
/// surfaced to the caller, never swallowed at this layer.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of the listing selected by `mode`
    ///
    /// Fails with `Transport` or `Decode`.
    async fn fetch_page(&self, mode: &QueryMode, page: u32) -> SourceResult<Page>;

    /// Fetch one page of the account's favorites subset
    ///
    /// Fails with `Transport` or `Decode`.
    async fn fetch_favorites_page(&self, page: u32) -> SourceResult<Page>;

    /// Set or clear the favorite flag of a single item
    ///
    /// Idempotent from the caller's perspective: repeating the call with the
    /// same flag leaves the same end state. Fails with `Transport` or
    /// `Rejected`.
    async fn set_favorite(&self, id: MediaId, favorite: bool) -> SourceResult<()>;
}
