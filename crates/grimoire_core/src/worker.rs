//! The background worker surface: one `CardWorker` owns the corpus, the
//! fuzzy name index, the volatile price map, and the search cache.
//! `initialize` is the only asynchronous step; every query operation after
//! it is synchronous. Concurrent `initialize` calls share one in-flight
//! load.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use color_eyre::Result;
use url::Url;
use uuid::Uuid;

use crate::corpus::{loader, Card, CardAccess, Corpus, LoadError};
use crate::fuzzy::NameIndex;
use crate::query::{execute, parse, sort_cards, ParseError, SortSpec};
use crate::search::{
    unified_search, PaginatedResult, Restrictions, SearchCache, DEFAULT_CACHE_CAPACITY,
};
use crate::validator::{validate, Deck, ValidateOptions, ValidationReport};
use crate::volatile::VolatileRecord;

/// Errors from worker operations after construction.
#[derive(thiserror::Error, Debug)]
pub enum WorkerError {
    #[error("worker is not initialized; call initialize first")]
    NotInitialized,

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Configuration for the card worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base URL the corpus index, card chunks, and volatile blob hang off.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Search cache capacity in fingerprints.
    pub cache_capacity: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://data.grimoire.cards/corpus/".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: "grimoire-core/0.1".to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Builder for configuring a [`CardWorker`].
#[derive(Debug, Clone, Default)]
pub struct CardWorkerBuilder {
    config: WorkerConfig,
}

impl CardWorkerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL corpus documents are fetched from.
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the search cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<CardWorker> {
        CardWorker::with_config(self.config)
    }
}

struct WorkerState {
    corpus: Corpus,
    names: NameIndex,
}

type VolatileMap = HashMap<Uuid, VolatileRecord>;

/// The card query worker.
pub struct CardWorker {
    client: reqwest::Client,
    config: WorkerConfig,
    state: tokio::sync::OnceCell<WorkerState>,
    volatile: Arc<RwLock<Option<VolatileMap>>>,
    cache: Mutex<SearchCache>,
}

/// Result of a syntax search: either the matching cards or a structured
/// parse error for the UI to highlight.
#[derive(Debug, Clone)]
pub enum SyntaxSearchResult {
    Cards(Vec<Card>),
    ParseFailed(ParseError),
}

impl CardWorker {
    /// Create a worker with default configuration.
    pub fn new() -> Result<CardWorker> {
        Self::with_config(WorkerConfig::default())
    }

    /// Create a worker with custom configuration.
    pub fn with_config(config: WorkerConfig) -> Result<CardWorker> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(CardWorker {
            client,
            cache: Mutex::new(SearchCache::new(config.cache_capacity)),
            config,
            state: tokio::sync::OnceCell::new(),
            volatile: Arc::new(RwLock::new(None)),
        })
    }

    /// Create an already-initialized worker over an existing corpus. No
    /// fetching happens; volatile data stays absent until supplied.
    pub fn with_corpus(corpus: Corpus) -> CardWorker {
        let names = NameIndex::build(&corpus);
        CardWorker {
            client: reqwest::Client::new(),
            cache: Mutex::new(SearchCache::new(DEFAULT_CACHE_CAPACITY)),
            config: WorkerConfig::default(),
            state: tokio::sync::OnceCell::new_with(Some(WorkerState { corpus, names })),
            volatile: Arc::new(RwLock::new(None)),
        }
    }

    pub fn builder() -> CardWorkerBuilder {
        CardWorkerBuilder::new()
    }

    /// Fetch the corpus and build the indexes. Idempotent: concurrent and
    /// repeated calls share the first load. The volatile blob loads in the
    /// background and never blocks initialization; on failure the volatile
    /// map simply stays empty.
    pub async fn initialize(&self) -> Result<()> {
        self.state
            .get_or_try_init(|| async {
                let base = Url::parse(&self.config.base_url).map_err(LoadError::Url)?;
                let corpus = loader::fetch_corpus(&self.client, &base).await?;
                let names = NameIndex::build(&corpus);

                let volatile_url = base.join("volatile.bin").map_err(LoadError::Url)?;
                let client = self.client.clone();
                let slot = Arc::clone(&self.volatile);
                tokio::spawn(async move {
                    match loader::fetch_volatile(&client, volatile_url).await {
                        Ok(map) => {
                            tracing::info!(records = map.len(), "volatile data loaded");
                            if let Ok(mut guard) = slot.write() {
                                *guard = Some(map);
                            }
                        }
                        Err(error) => {
                            tracing::warn!(%error, "volatile data load failed");
                        }
                    }
                });

                Ok::<_, color_eyre::Report>(WorkerState { corpus, names })
            })
            .await?;
        Ok(())
    }

    fn state(&self) -> Result<&WorkerState, WorkerError> {
        self.state.get().ok_or(WorkerError::NotInitialized)
    }

    /// Fuzzy name search with optional restrictions, capped at `max`.
    pub fn search_cards(
        &self,
        name: &str,
        restrictions: &Restrictions,
        max: usize,
    ) -> Result<Vec<Card>, WorkerError> {
        let state = self.state()?;
        let cards = state
            .names
            .search(name, usize::MAX)
            .into_iter()
            .filter_map(|id| state.corpus.card(&id))
            .filter(|card| restrictions.admits(card))
            .take(max)
            .cloned()
            .collect();
        Ok(cards)
    }

    /// Parse and evaluate a syntax query, returning at most `max` cards or
    /// a parse error with its span.
    pub fn syntax_search(
        &self,
        query: &str,
        max: usize,
        sort: SortSpec,
    ) -> Result<SyntaxSearchResult, WorkerError> {
        let state = self.state()?;
        let parsed = match parse(query) {
            Ok(parsed) => parsed,
            Err(error) => return Ok(SyntaxSearchResult::ParseFailed(error)),
        };
        let mut cards = execute(&state.corpus, &parsed);
        sort_cards(&mut cards, sort);
        cards.truncate(max);
        Ok(SyntaxSearchResult::Cards(
            cards.into_iter().cloned().collect(),
        ))
    }

    /// Cached, paginated unified search; see the search module for the
    /// fuzzy-vs-syntax decision and cache semantics.
    pub fn paginated_unified_search(
        &self,
        query: &str,
        restrictions: &Restrictions,
        sort: SortSpec,
        offset: usize,
        limit: usize,
    ) -> Result<PaginatedResult, WorkerError> {
        let state = self.state()?;
        let mut cache = self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(unified_search(
            &state.corpus,
            &state.names,
            &mut cache,
            query,
            restrictions,
            sort,
            offset,
            limit,
        ))
    }

    pub fn get_card_by_id(&self, id: &Uuid) -> Result<Option<Card>, WorkerError> {
        Ok(self.state()?.corpus.card(id).cloned())
    }

    pub fn get_printings_by_oracle_id(&self, oracle_id: &Uuid) -> Result<Vec<Uuid>, WorkerError> {
        Ok(self.state()?.corpus.printings(oracle_id).to_vec())
    }

    pub fn get_canonical_printing(&self, oracle_id: &Uuid) -> Result<Option<Uuid>, WorkerError> {
        Ok(self.state()?.corpus.canonical_printing(oracle_id))
    }

    /// Rank and price data for a printing; `None` until the volatile blob
    /// has loaded, and for printings it does not cover.
    pub fn get_volatile_data(&self, id: &Uuid) -> Option<VolatileRecord> {
        self.volatile
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().and_then(|map| map.get(id).cloned()))
    }

    pub fn is_volatile_data_ready(&self) -> bool {
        self.volatile.read().is_ok_and(|guard| guard.is_some())
    }

    /// Supply volatile data directly, for embedders that load it out of
    /// band.
    pub fn set_volatile_data(&self, records: VolatileMap) {
        if let Ok(mut guard) = self.volatile.write() {
            *guard = Some(records);
        }
    }

    /// Validate a deck against the corpus.
    pub fn validate_deck(
        &self,
        deck: &Deck,
        options: &ValidateOptions,
    ) -> Result<ValidationReport, WorkerError> {
        let state = self.state()?;
        Ok(validate(deck, &state.corpus, options))
    }
}
