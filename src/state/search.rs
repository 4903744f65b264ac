// Search orchestration.
// Runs location and keyword queries through the cache and search service, publishing one current state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::SearchService;
use crate::cache::{CacheKey, DurableStore, SearchCache};
use crate::error::QueryError;
use crate::geo::{Coordinate, Locator};
use crate::venue::{DisplayResult, normalize_all};

use super::loading::LoadingState;

/// Published result list, or why there is none.
pub type SearchStatus = LoadingState<Vec<DisplayResult>, QueryError>;

/// The query a published state belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Waiting on the locator; the coordinate is not known yet.
    Nearby,
    Location(Coordinate),
    Keyword(String),
}

/// Snapshot of the most recently started query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Sequence number of the query this state belongs to.
    pub seq: u64,
    pub query: Option<Query>,
    pub status: SearchStatus,
}

/// What happened to a query's outcome when it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Published,
    /// A newer query started first; the outcome was dropped.
    Superseded,
}

/// Coordinates the locator, cache, search service, and normalizer.
///
/// Queries are not deduplicated or cancelled. Each one takes the next sequence
/// number when it starts, and its outcome is published only if no newer query
/// has started by the time it completes.
pub struct SearchOrchestrator<S, D> {
    service: S,
    cache: Mutex<SearchCache<D>>,
    seq: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl<S: SearchService, D: DurableStore> SearchOrchestrator<S, D> {
    pub fn new(service: S, cache: SearchCache<D>) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            service,
            cache: Mutex::new(cache),
            seq: AtomicU64::new(0),
            state,
        }
    }

    /// Receive every published state change.
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Current published state.
    pub fn snapshot(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Run `f` against the cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut SearchCache<D>) -> R) -> R {
        f(&mut self.lock_cache())
    }

    /// Locate the user, then search around that position.
    pub async fn search_nearby<L: Locator>(&self, locator: &L) -> Completion {
        let seq = self.next_seq();
        self.publish(seq, Query::Nearby, LoadingState::Loading);

        match locator.locate().await {
            Ok(coordinate) => self.run_location(seq, coordinate).await,
            Err(e) => {
                warn!(error = %e, "could not determine location");
                self.publish(seq, Query::Nearby, LoadingState::Error(e.into()))
            }
        }
    }

    /// Search around `coordinate`, serving from cache when a fresh entry exists.
    pub async fn search_by_location(&self, coordinate: Coordinate) -> Completion {
        let seq = self.next_seq();
        self.run_location(seq, coordinate).await
    }

    /// Search by free text. Keyword results are never cached and carry no distances.
    pub async fn search_by_keyword(&self, keyword: &str) -> Completion {
        let seq = self.next_seq();
        let query = Query::Keyword(keyword.to_string());
        self.publish(seq, query.clone(), LoadingState::Loading);

        let status = match self.service.search_by_keyword(keyword).await {
            Ok(raws) => LoadingState::Loaded(normalize_all(&raws, None)),
            Err(e) => {
                warn!(keyword, error = %e, "keyword search failed");
                LoadingState::Error(e.into())
            }
        };
        self.publish(seq, query, status)
    }

    async fn run_location(&self, seq: u64, coordinate: Coordinate) -> Completion {
        let key = CacheKey::from_coordinate(coordinate);
        let query = Query::Location(coordinate);

        let cached = self.lock_cache().get(&key);
        if let Some(entry) = cached {
            info!(%key, count = entry.results.len(), "serving cached results");
            let results = normalize_all(&entry.results, Some(coordinate));
            return self.publish(seq, query, LoadingState::Loaded(results));
        }

        self.publish(seq, query.clone(), LoadingState::Loading);

        let status = match self.service.search_by_location(coordinate).await {
            Ok(raws) => {
                // Written even if this query has been superseded; last write wins.
                self.lock_cache().put(&key, raws.clone());
                LoadingState::Loaded(normalize_all(&raws, Some(coordinate)))
            }
            Err(e) => {
                warn!(%key, error = %e, "location search failed");
                LoadingState::Error(e.into())
            }
        };
        self.publish(seq, query, status)
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn publish(&self, seq: u64, query: Query, status: SearchStatus) -> Completion {
        let current = self.seq.load(Ordering::SeqCst);
        if seq != current {
            debug!(seq, current, "dropping superseded search outcome");
            return Completion::Superseded;
        }

        self.state.send_replace(SearchState {
            seq,
            query: Some(query),
            status,
        });
        Completion::Published
    }

    fn lock_cache(&self) -> MutexGuard<'_, SearchCache<D>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
