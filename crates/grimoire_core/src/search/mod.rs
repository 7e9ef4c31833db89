//! Unified search: one entry point that routes free-text input to the
//! fuzzy name index and operator queries to the parser and evaluator, with
//! a bounded LRU cache of fully materialized result lists keyed by a
//! search fingerprint. Pagination slices cached lists; offset and limit
//! never participate in the cache key.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::corpus::{Card, CardAccess, Colors, Corpus};
use crate::fuzzy::NameIndex;
use crate::query::{execute, parse, sort_cards, ParseError, SortSpec};

/// Default number of fingerprints the cache retains.
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Optional narrowing applied after matching: format legality and a color
/// identity ceiling. Applies to both the fuzzy and the syntax path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Restrictions {
    pub format: Option<String>,
    pub color_identity: Option<Colors>,
}

impl Restrictions {
    /// Whether a card passes the format and identity restriction.
    pub fn admits(&self, card: &Card) -> bool {
        if let Some(format) = &self.format {
            if !card.legality(format).is_playable() {
                return false;
            }
        }
        if let Some(ceiling) = self.color_identity {
            if !card.color_identity.is_subset(ceiling) {
                return false;
            }
        }
        true
    }
}

/// Which pipeline produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Fuzzy,
    Syntax,
}

/// A fully materialized result list for one fingerprint. Only printing ids
/// are retained so eviction stays cheap.
#[derive(Debug, Clone)]
pub struct CachedResult {
    pub mode: SearchMode,
    pub ids: Vec<Uuid>,
    pub description: Option<String>,
    pub error: Option<ParseError>,
}

/// One page of results.
#[derive(Debug, Clone)]
pub struct PaginatedResult {
    pub mode: SearchMode,
    pub cards: Vec<Card>,
    pub total_count: usize,
    pub description: Option<String>,
    pub error: Option<ParseError>,
}

#[derive(Serialize)]
struct FingerprintParts<'a> {
    query: &'a str,
    restrictions: &'a Restrictions,
    sort: SortSpec,
}

/// Stable cache key over query text, restrictions, and sort. Two requests
/// differing only in offset/limit share a fingerprint.
pub fn fingerprint(query: &str, restrictions: &Restrictions, sort: SortSpec) -> String {
    let parts = FingerprintParts {
        query: query.trim(),
        restrictions,
        sort,
    };
    let serialized = serde_json::to_string(&parts).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let digest = hasher.finalize();
    digest
        .iter()
        .take(8)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Bounded cache with strict least-recently-used eviction. Reads and
/// writes both refresh recency.
#[derive(Debug)]
pub struct SearchCache {
    capacity: usize,
    entries: HashMap<String, CachedResult>,
    order: VecDeque<String>,
}

impl SearchCache {
    pub fn new(capacity: usize) -> SearchCache {
        SearchCache {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, key: &str) {
        if let Some(position) = self.order.iter().position(|k| k == key) {
            self.order.remove(position);
        }
        self.order.push_back(key.to_string());
    }

    pub fn get(&mut self, key: &str) -> Option<&CachedResult> {
        if self.entries.contains_key(key) {
            self.touch(key);
        }
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: String, result: CachedResult) {
        self.touch(&key);
        self.entries.insert(key, result);
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.entries.remove(&evicted);
                tracing::debug!(key = %evicted, "evicted search cache entry");
            }
        }
    }
}

impl Default for SearchCache {
    fn default() -> Self {
        SearchCache::new(DEFAULT_CACHE_CAPACITY)
    }
}

/// Run one paginated request through the cache.
pub fn unified_search(
    corpus: &Corpus,
    names: &NameIndex,
    cache: &mut SearchCache,
    query: &str,
    restrictions: &Restrictions,
    sort: SortSpec,
    offset: usize,
    limit: usize,
) -> PaginatedResult {
    let key = fingerprint(query, restrictions, sort);
    if let Some(entry) = cache.get(&key) {
        tracing::debug!(%key, "search cache hit");
        let entry = entry.clone();
        return page(corpus, &entry, offset, limit);
    }

    let entry = compute(corpus, names, query, restrictions, sort);
    let result = page(corpus, &entry, offset, limit);
    cache.insert(key, entry);
    result
}

fn compute(
    corpus: &Corpus,
    names: &NameIndex,
    query: &str,
    restrictions: &Restrictions,
    sort: SortSpec,
) -> CachedResult {
    let parsed = match parse(query) {
        Ok(parsed) => parsed,
        Err(error) => {
            return CachedResult {
                mode: SearchMode::Syntax,
                ids: Vec::new(),
                description: None,
                error: Some(error),
            }
        }
    };

    if let Some(name) = parsed.as_bare_name() {
        tracing::debug!(%name, "fuzzy search");
        let ids = names
            .search(name, usize::MAX)
            .into_iter()
            .filter(|id| corpus.card(id).is_some_and(|card| restrictions.admits(card)))
            .collect();
        return CachedResult {
            mode: SearchMode::Fuzzy,
            ids,
            description: Some(format!("Names matching \"{}\"", name.trim())),
            error: None,
        };
    }

    tracing::debug!(%query, "syntax search");
    let mut cards: Vec<&Card> = execute(corpus, &parsed)
        .into_iter()
        .filter(|card| restrictions.admits(card))
        .collect();
    sort_cards(&mut cards, sort);
    CachedResult {
        mode: SearchMode::Syntax,
        ids: cards.into_iter().map(|card| card.id).collect(),
        description: None,
        error: None,
    }
}

fn page(corpus: &Corpus, entry: &CachedResult, offset: usize, limit: usize) -> PaginatedResult {
    let total = entry.ids.len();
    let start = offset.min(total);
    let end = offset.saturating_add(limit).min(total);
    let cards = entry.ids[start..end]
        .iter()
        .filter_map(|id| corpus.card(id).cloned())
        .collect();
    PaginatedResult {
        mode: entry.mode,
        cards,
        total_count: total,
        description: entry.description.clone(),
        error: entry.error.clone(),
    }
}
