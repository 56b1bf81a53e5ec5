// src/store/paged_collection.rs
//
// Locally cached mirror of one remote paged listing.
//
// All state sits behind one mutex that is only held for synchronous sections;
// the network fetch is the single suspension point of every operation. Each
// reset bumps a generation counter, and a response is applied only if its
// generation is still the current one, so a superseded fetch can never write
// into state it no longer owns.

use std::sync::{Arc, Mutex};

use log::{debug, warn};
use serde::Serialize;

use crate::domain::{MediaItem, Page, QueryMode};
use crate::error::{SourceError, SourceResult};
use crate::source::CatalogSource;
use crate::store::page_buffer::PageBuffer;

// ============================================================================
// Snapshot
// ============================================================================

/// One consistent view of a collection's observable state
///
/// Taken under the state lock, so items, counters and flags always belong to
/// the same moment.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionSnapshot {
    pub items: Vec<MediaItem>,
    pub current_page: u32,
    pub total_pages: Option<u32>,
    pub total_count: Option<u64>,
    pub is_loading: bool,
    pub error: Option<SourceError>,
}

// ============================================================================
// State
// ============================================================================

struct CollectionState {
    mode: QueryMode,
    buffer: PageBuffer,
    /// Highest page number issued for the current mode, 0 before any fetch
    current_page: u32,
    total_pages: Option<u32>,
    total_count: Option<u64>,
    is_loading: bool,
    /// Failure of the last issued page; also marks that page as not applied
    error: Option<SourceError>,
    /// Bumped on every reset; stale responses carry an older value
    generation: u64,
}

impl CollectionState {
    fn new() -> Self {
        Self {
            mode: QueryMode::default(),
            buffer: PageBuffer::new(),
            current_page: 0,
            total_pages: None,
            total_count: None,
            is_loading: false,
            error: None,
            generation: 0,
        }
    }

    fn is_exhausted(&self) -> bool {
        match self.total_pages {
            Some(total) => self.current_page >= total,
            None => false,
        }
    }
}

// ============================================================================
// Collection
// ============================================================================

/// Incrementally loaded, identity-deduplicated collection under a query mode
///
/// Pages accumulate in fetch order and an id never appears twice, whatever
/// the server repeats as its listing shifts underneath the pagination.
/// Switching [`QueryMode`] discards everything and starts over at page 1.
pub struct PagedCollection {
    source: Arc<dyn CatalogSource>,
    state: Mutex<CollectionState>,
}

impl PagedCollection {
    /// Create a collection in browse mode with nothing fetched yet
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CollectionState::new()),
        }
    }

    // ========================================================================
    // COMMANDS
    // ========================================================================

    /// Switch the active query mode
    ///
    /// Value equality decides: setting the current mode again is a no-op,
    /// any actual change discards the accumulated pages and reloads page 1
    /// under the new mode.
    pub async fn set_mode(&self, mode: QueryMode) {
        let changed = {
            let state = self.state.lock().unwrap();
            state.mode != mode
        };
        if !changed {
            debug!("mode unchanged ({}), keeping accumulated pages", mode);
            return;
        }
        self.reset_and_load(mode).await;
    }

    /// Discard all accumulated state and load page 1 under `mode`
    ///
    /// The clear is synchronous: readers observe an empty loading collection
    /// before the fetch resolves. A fetch still in flight from before the
    /// reset is superseded and will be discarded when it completes.
    pub async fn reset_and_load(&self, mode: QueryMode) {
        let generation = {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.mode = mode.clone();
            state.buffer.clear();
            state.current_page = 1;
            state.total_pages = None;
            state.total_count = None;
            state.error = None;
            state.is_loading = true;
            state.generation
        };

        debug!("collection reset, loading page 1 under {}", mode);
        let result = self.source.fetch_page(&mode, 1).await;
        self.settle(generation, 1, result);
    }

    /// Fetch the page after the last issued one for the current mode
    ///
    /// No-op while a load is in flight or when the known page bound is
    /// exhausted. After a failure the same page is retried instead of
    /// advancing past the gap it would leave.
    pub async fn advance_page(&self) {
        let issued = {
            let mut state = self.state.lock().unwrap();
            if state.is_loading {
                debug!("advance ignored: load already in flight");
                None
            } else {
                // A recorded error marks current_page as issued but never
                // applied, so the retry targets it again.
                let retrying = state.error.is_some();
                if !retrying && state.is_exhausted() {
                    debug!(
                        "advance ignored: page {} of {:?} already loaded",
                        state.current_page, state.total_pages
                    );
                    None
                } else {
                    let target = if retrying {
                        state.current_page
                    } else {
                        state.current_page + 1
                    };
                    state.current_page = target;
                    state.error = None;
                    state.is_loading = true;
                    Some((state.mode.clone(), target, state.generation))
                }
            }
        };

        let Some((mode, page, generation)) = issued else {
            return;
        };

        debug!("fetching page {} under {}", page, mode);
        let result = self.source.fetch_page(&mode, page).await;
        self.settle(generation, page, result);
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Accumulated items in fetch order
    pub fn items(&self) -> Vec<MediaItem> {
        self.state.lock().unwrap().buffer.to_vec()
    }

    pub fn mode(&self) -> QueryMode {
        self.state.lock().unwrap().mode.clone()
    }

    pub fn current_page(&self) -> u32 {
        self.state.lock().unwrap().current_page
    }

    /// Page bound reported by the server, `None` until the first response
    pub fn total_pages(&self) -> Option<u32> {
        self.state.lock().unwrap().total_pages
    }

    pub fn total_count(&self) -> Option<u64> {
        self.state.lock().unwrap().total_count
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().is_loading
    }

    /// Failure of the most recently settled fetch, cleared by the next issue
    pub fn error(&self) -> Option<SourceError> {
        self.state.lock().unwrap().error.clone()
    }

    /// Whether [`advance_page`](Self::advance_page) still has a page to fetch
    ///
    /// True while the bound is unknown, not yet reached, or the last fetch
    /// failed and is awaiting its retry.
    pub fn has_more(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.error.is_some() || !state.is_exhausted()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap().buffer.is_empty()
    }

    /// Capture every observable field under one lock acquisition
    pub fn snapshot(&self) -> CollectionSnapshot {
        let state = self.state.lock().unwrap();
        CollectionSnapshot {
            items: state.buffer.to_vec(),
            current_page: state.current_page,
            total_pages: state.total_pages,
            total_count: state.total_count,
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn buffer_is_consistent(&self) -> bool {
        self.state.lock().unwrap().buffer.is_consistent()
    }

    // ========================================================================
    // INTERNAL: Settling
    // ========================================================================

    /// Apply a settled fetch outcome if `generation` is still current
    ///
    /// A superseded response is discarded wholesale. The newer load owns
    /// every field including the loading flag, so nothing is touched here.
    fn settle(&self, generation: u64, page: u32, result: SourceResult<Page>) {
        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            debug!("discarding superseded response for page {}", page);
            return;
        }

        match result {
            Ok(response) => {
                let appended = state.buffer.merge(response.items);
                state.total_pages = Some(response.total_pages);
                state.total_count = Some(response.total_count);
                debug!(
                    "page {} applied: {} new items, {} accumulated",
                    page,
                    appended,
                    state.buffer.len()
                );
            }
            Err(err) => {
                warn!("page {} failed: {}", page, err);
                state.error = Some(err);
            }
        }
        state.is_loading = false;
    }
}
