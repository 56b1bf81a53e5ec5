// src/store/favorite_store.rs
//
// Cross-session favorites with optimistic mark/unmark.
//
// Membership is applied locally before the server call and reverted if the
// call fails, so the UI never waits on the network and never ends up lying
// after a failure. Same shape as the paged collection otherwise: one state
// mutex held only in synchronous sections, generation counter for refresh.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::domain::{MediaId, MediaItem, Page};
use crate::error::{MutationError, SourceError, SourceResult};
use crate::source::CatalogSource;
use crate::store::page_buffer::PageBuffer;
use crate::store::paged_collection::CollectionSnapshot;

// ============================================================================
// State
// ============================================================================

struct FavoriteState {
    buffer: PageBuffer,
    /// Highest favorites page issued, 0 before any fetch
    current_page: u32,
    total_pages: Option<u32>,
    total_count: Option<u64>,
    is_loading: bool,
    /// Set once an initial load has succeeded; emptiness does not reset it
    loaded: bool,
    /// Failure of the last issued page; also marks that page as not applied
    error: Option<SourceError>,
    /// Bumped on refresh; stale responses and rollbacks carry an older value
    generation: u64,
}

impl FavoriteState {
    fn new() -> Self {
        Self {
            buffer: PageBuffer::new(),
            current_page: 0,
            total_pages: None,
            total_count: None,
            is_loading: false,
            loaded: false,
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

/// Inverse of one optimistic toggle, captured at apply time
enum Undo {
    Remove(MediaId),
    Restore(Vec<(usize, MediaItem)>),
}

// ============================================================================
// Store
// ============================================================================

/// Paged favorites set with optimistic, rolled-back-on-failure toggling
///
/// The id set answers [`is_favorite`](Self::is_favorite) in O(1) across every
/// listing the items were first seen in. Toggles for the same id are
/// serialized so two rapid taps cannot interleave their server calls;
/// toggles for different ids run concurrently.
pub struct FavoriteStore {
    source: Arc<dyn CatalogSource>,
    state: Mutex<FavoriteState>,
    toggle_locks: Mutex<HashMap<MediaId, Arc<tokio::sync::Mutex<()>>>>,
}

impl FavoriteStore {
    /// Create a store that has never loaded
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            state: Mutex::new(FavoriteState::new()),
            toggle_locks: Mutex::new(HashMap::new()),
        }
    }

    // ========================================================================
    // LOADING
    // ========================================================================

    /// Fetch the first favorites page unless one already succeeded
    ///
    /// No-op while a load is in flight or once `loaded` is set, so callers
    /// can invoke it on every screen entry. A failure leaves the store
    /// unloaded and retryable by the next call.
    pub async fn load_initial(&self) {
        let generation = {
            let mut state = self.state.lock().unwrap();
            if state.is_loading {
                debug!("favorites load ignored: load already in flight");
                return;
            }
            if state.loaded {
                debug!("favorites load ignored: already loaded");
                return;
            }
            state.current_page = 1;
            state.error = None;
            state.is_loading = true;
            state.generation
        };

        debug!("loading favorites page 1");
        let result = self.source.fetch_favorites_page(1).await;
        self.settle(generation, 1, result, true);
    }

    /// Fetch the favorites page after the last issued one
    ///
    /// Same advance discipline as the catalog collection: no-op while
    /// loading or past the known bound, retry the same page after a failure.
    pub async fn load_next_page(&self) {
        let issued = {
            let mut state = self.state.lock().unwrap();
            if state.is_loading {
                debug!("favorites advance ignored: load already in flight");
                None
            } else {
                let retrying = state.error.is_some();
                if !retrying && state.is_exhausted() {
                    debug!(
                        "favorites advance ignored: page {} of {:?} already loaded",
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
                    Some((target, state.generation))
                }
            }
        };

        let Some((page, generation)) = issued else {
            return;
        };

        debug!("loading favorites page {}", page);
        let result = self.source.fetch_favorites_page(page).await;
        self.settle(generation, page, result, false);
    }

    /// Drop everything, forget the loaded flag and load page 1 again
    ///
    /// The clear is synchronous; in-flight responses and rollbacks from
    /// before the refresh are superseded by the generation bump.
    pub async fn refresh(&self) {
        {
            let mut state = self.state.lock().unwrap();
            state.generation += 1;
            state.buffer.clear();
            state.current_page = 0;
            state.total_pages = None;
            state.total_count = None;
            state.error = None;
            state.loaded = false;
            state.is_loading = false;
        }
        debug!("favorites cleared, reloading");
        self.load_initial().await;
    }

    // ========================================================================
    // TOGGLING
    // ========================================================================

    /// Flip membership for `item`, optimistically and with rollback
    ///
    /// Local membership changes before the server call. On failure the exact
    /// inverse is applied (same position for a removed item) and the error
    /// surfaces as [`MutationError`], unlike load failures which are only
    /// recorded. Calls for one id queue behind each other; a second tap
    /// therefore sees the membership the first one produced.
    pub async fn toggle_favorite(&self, item: &MediaItem) -> Result<(), MutationError> {
        let toggle_lock = self.toggle_lock(item.id);
        let _serialized = toggle_lock.lock().await;

        let (will_mark, undo, generation) = {
            let mut state = self.state.lock().unwrap();
            let will_mark = !state.buffer.contains(item.id);
            let undo = if will_mark {
                state.buffer.insert(item.clone());
                Undo::Remove(item.id)
            } else {
                Undo::Restore(state.buffer.remove(item.id))
            };
            (will_mark, undo, state.generation)
        };

        debug!(
            "optimistically {} media {}",
            if will_mark { "marking" } else { "unmarking" },
            item.id
        );

        match self.source.set_favorite(item.id, will_mark).await {
            Ok(()) => Ok(()),
            Err(source) => {
                {
                    let mut state = self.state.lock().unwrap();
                    if state.generation == generation {
                        match undo {
                            Undo::Remove(id) => {
                                state.buffer.remove(id);
                            }
                            Undo::Restore(entries) => state.buffer.restore(entries),
                        }
                        warn!("favorite update for media {} rolled back: {}", item.id, source);
                    } else {
                        // The refresh that bumped the generation already
                        // discarded the optimistic write along with the rest.
                        debug!("no rollback for media {}: store was refreshed mid-flight", item.id);
                    }
                }
                Err(MutationError {
                    media_id: item.id,
                    source,
                })
            }
        }
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// O(1) membership check by id
    pub fn is_favorite(&self, id: MediaId) -> bool {
        self.state.lock().unwrap().buffer.contains(id)
    }

    /// Favorites in fetch order, optimistic marks at the end
    pub fn items(&self) -> Vec<MediaItem> {
        self.state.lock().unwrap().buffer.to_vec()
    }

    /// Whether an initial load has succeeded since creation or last refresh
    pub fn is_loaded(&self) -> bool {
        self.state.lock().unwrap().loaded
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().is_loading
    }

    /// Failure of the most recently settled load, cleared by the next issue
    pub fn error(&self) -> Option<SourceError> {
        self.state.lock().unwrap().error.clone()
    }

    pub fn current_page(&self) -> u32 {
        self.state.lock().unwrap().current_page
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.state.lock().unwrap().total_pages
    }

    pub fn total_count(&self) -> Option<u64> {
        self.state.lock().unwrap().total_count
    }

    /// Whether [`load_next_page`](Self::load_next_page) still has work
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
    // INTERNAL: Locks and Settling
    // ========================================================================

    /// Hand out the serialization lock for one media id
    ///
    /// Entries whose only holder is the map itself are pruned first, so the
    /// map stays bounded by the number of toggles actually in flight.
    fn toggle_lock(&self, id: MediaId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.toggle_locks.lock().unwrap();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        Arc::clone(locks.entry(id).or_default())
    }

    /// Apply a settled load outcome if `generation` is still current
    fn settle(&self, generation: u64, page: u32, result: SourceResult<Page>, initial: bool) {
        let mut state = self.state.lock().unwrap();
        if state.generation != generation {
            debug!("discarding superseded favorites response for page {}", page);
            return;
        }

        match result {
            Ok(response) => {
                let appended = state.buffer.merge(response.items);
                state.total_pages = Some(response.total_pages);
                state.total_count = Some(response.total_count);
                if initial {
                    state.loaded = true;
                }
                debug!(
                    "favorites page {} applied: {} new items, {} accumulated",
                    page,
                    appended,
                    state.buffer.len()
                );
            }
            Err(err) => {
                warn!("favorites page {} failed: {}", page, err);
                state.error = Some(err);
            }
        }
        state.is_loading = false;
    }
}
