// src/store/test_support.rs
//
// Hand-rolled catalog source for interleaving tests.
//
// Mock objects answer "what does this call return"; the store scenarios also
// need "hold this call open until the test says so". Every scripted response
// can carry a gate the test must release before the call returns, which lets
// a test park a fetch mid-flight, mutate the store, then let the response
// land and assert it was applied or discarded.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::{MediaId, MediaItem, Page, QueryMode};
use crate::error::SourceResult;
use crate::source::CatalogSource;

// ============================================================================
// Fixtures
// ============================================================================

pub fn media(id: MediaId) -> MediaItem {
    MediaItem::new(id, format!("Movie {id}"))
}

pub fn page(page_number: u32, total_pages: u32, ids: &[MediaId]) -> Page {
    Page {
        page_number,
        items: ids.iter().copied().map(media).collect(),
        total_pages,
        total_count: u64::from(total_pages) * ids.len() as u64,
    }
}

// ============================================================================
// Gate
// ============================================================================

/// Two-sided rendezvous around one scripted call
///
/// The source side announces arrival and then parks until released. Notify
/// stores a permit when nobody is waiting yet, so neither side depends on
/// being first.
#[derive(Default)]
pub struct Gate {
    arrived: Notify,
    released: Notify,
}

impl Gate {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Wait until the gated call has been entered
    pub async fn entered(&self) {
        self.arrived.notified().await;
    }

    /// Let the gated call return its scripted result
    pub fn release(&self) {
        self.released.notify_one();
    }

    async fn pass(&self) {
        self.arrived.notify_one();
        self.released.notified().await;
    }
}

// ============================================================================
// Scripted source
// ============================================================================

/// Argument record of every call the store made, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    FetchPage { mode: QueryMode, page: u32 },
    FetchFavorites { page: u32 },
    SetFavorite { id: MediaId, favorite: bool },
}

struct Scripted<T> {
    result: SourceResult<T>,
    gate: Option<Arc<Gate>>,
}

/// Catalog source answering from per-method FIFO scripts
///
/// Each call pops the next scripted response for its method and panics if
/// the script ran dry, so a test also fails loudly when the store issues a
/// call the scenario did not expect.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Mutex<VecDeque<Scripted<Page>>>,
    favorites: Mutex<VecDeque<Scripted<Page>>>,
    mutations: Mutex<VecDeque<Scripted<()>>>,
    calls: Mutex<Vec<SourceCall>>,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_page(&self, result: SourceResult<Page>) {
        self.pages.lock().unwrap().push_back(Scripted { result, gate: None });
    }

    pub fn push_gated_page(&self, result: SourceResult<Page>) -> Arc<Gate> {
        let gate = Gate::new();
        self.pages.lock().unwrap().push_back(Scripted {
            result,
            gate: Some(Arc::clone(&gate)),
        });
        gate
    }

    pub fn push_favorites(&self, result: SourceResult<Page>) {
        self.favorites.lock().unwrap().push_back(Scripted { result, gate: None });
    }

    pub fn push_gated_favorites(&self, result: SourceResult<Page>) -> Arc<Gate> {
        let gate = Gate::new();
        self.favorites.lock().unwrap().push_back(Scripted {
            result,
            gate: Some(Arc::clone(&gate)),
        });
        gate
    }

    pub fn push_mutation(&self, result: SourceResult<()>) {
        self.mutations.lock().unwrap().push_back(Scripted { result, gate: None });
    }

    pub fn push_gated_mutation(&self, result: SourceResult<()>) -> Arc<Gate> {
        let gate = Gate::new();
        self.mutations.lock().unwrap().push_back(Scripted {
            result,
            gate: Some(Arc::clone(&gate)),
        });
        gate
    }

    pub fn calls(&self) -> Vec<SourceCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next<T>(queue: &Mutex<VecDeque<Scripted<T>>>, what: &str) -> Scripted<T> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted {what} call"))
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    async fn fetch_page(&self, mode: &QueryMode, page: u32) -> SourceResult<Page> {
        self.calls.lock().unwrap().push(SourceCall::FetchPage {
            mode: mode.clone(),
            page,
        });
        let scripted = Self::next(&self.pages, "fetch_page");
        if let Some(gate) = scripted.gate {
            gate.pass().await;
        }
        scripted.result
    }

    async fn fetch_favorites_page(&self, page: u32) -> SourceResult<Page> {
        self.calls.lock().unwrap().push(SourceCall::FetchFavorites { page });
        let scripted = Self::next(&self.favorites, "fetch_favorites_page");
        if let Some(gate) = scripted.gate {
            gate.pass().await;
        }
        scripted.result
    }

    async fn set_favorite(&self, id: MediaId, favorite: bool) -> SourceResult<()> {
        self.calls.lock().unwrap().push(SourceCall::SetFavorite { id, favorite });
        let scripted = Self::next(&self.mutations, "set_favorite");
        if let Some(gate) = scripted.gate {
            gate.pass().await;
        }
        scripted.result
    }
}
