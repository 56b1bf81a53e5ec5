// src/store/mod.rs
//
// Stateful Sync Layer
//
// The two stores that mirror remote listings locally: the paged catalog
// collection and the favorites set. Both own their state behind a mutex,
// talk to the catalog through the CatalogSource port, and share the
// deduplicating page buffer.

pub mod favorite_store;
pub(crate) mod page_buffer;
pub mod paged_collection;

#[cfg(test)]
mod test_support;


// Re-export the store types
pub use favorite_store::FavoriteStore;
pub use paged_collection::{CollectionSnapshot, PagedCollection};
