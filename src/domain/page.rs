// src/domain/page.rs
//
// One page of a remote catalog listing.
//
// The shape is a logical contract with whatever backend implements the
// source trait; field names are not tied to any particular wire format.

use serde::{Deserialize, Serialize};

use crate::domain::media::{validate_media_item, MediaItem};
use crate::domain::{DomainError, DomainResult};

/// A single page of results as reported by the remote source
///
/// `total_pages` and `total_count` describe the whole listing at the moment
/// the page was produced; the server is authoritative for both and may shrink
/// them between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-based position of this page in the listing
    pub page_number: u32,

    /// Items in listing order; may legitimately be empty
    pub items: Vec<MediaItem>,

    /// Upper bound of the listing, in pages
    pub total_pages: u32,

    /// Total item count across all pages
    pub total_count: u64,
}

/// Validates Page invariants
///
/// A page that fails here is a malformed server payload, not a state the
/// client can reach on its own.
pub fn validate_page(page: &Page) -> DomainResult<()> {
    if page.page_number == 0 {
        return Err(DomainError::InvariantViolation(
            "Page number must be positive".to_string(),
        ));
    }

    if page.total_pages == 0 {
        return Err(DomainError::InvariantViolation(
            "Total page count must be positive".to_string(),
        ));
    }

    // An empty trailing page may carry a stale bound; only non-empty pages
    // are required to sit inside it.
    if !page.items.is_empty() && page.page_number > page.total_pages {
        return Err(DomainError::InvariantViolation(format!(
            "Page {} lies beyond the reported total of {}",
            page.page_number, page.total_pages
        )));
    }

    for item in &page.items {
        validate_media_item(item)?;
    }

    Ok(())
}
