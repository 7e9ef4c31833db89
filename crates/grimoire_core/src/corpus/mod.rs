//! In-memory card corpus: every known printing keyed by printing id, with
//! oracle-group and canonical-printing indexes layered on top.
//!
//! The corpus is built once from an index document plus a set of card
//! chunks and is immutable afterwards. Lookups never allocate.

pub mod canonical;
pub mod loader;
pub mod types;

use std::collections::HashMap;

use uuid::Uuid;

pub use canonical::{canonical_order, pick_canonical};
pub use loader::{CardChunk, CorpusIndex, LoadError};
pub use types::{Card, CardFace, Color, Colors, Game, ImageStatus, Layout, Legality, Rarity};

/// Read-only access to cards by printing and oracle id. The query evaluator
/// and the deck validator both consume this contract rather than a concrete
/// store.
pub trait CardAccess {
    fn card(&self, id: &Uuid) -> Option<&Card>;
    fn printings(&self, oracle_id: &Uuid) -> &[Uuid];
    fn canonical_printing(&self, oracle_id: &Uuid) -> Option<Uuid>;
}

/// The full card store.
#[derive(Debug, Default)]
pub struct Corpus {
    cards: HashMap<Uuid, Card>,
    oracle_printings: HashMap<Uuid, Vec<Uuid>>,
    canonical: HashMap<Uuid, Uuid>,
}

impl Corpus {
    /// Build a corpus from loose cards, deriving the oracle-group and
    /// canonical indexes from scratch.
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Corpus {
        let cards: HashMap<Uuid, Card> = cards.into_iter().map(|c| (c.id, c)).collect();
        let mut corpus = Corpus {
            cards,
            oracle_printings: HashMap::new(),
            canonical: HashMap::new(),
        };
        corpus.rebuild_indexes(&HashMap::new());
        corpus
    }

    /// Build a corpus from a fetched index document and its card chunks.
    /// Chunk maps are merged; index entries that reference printings missing
    /// from the merged map are dropped, and canonical entries are recomputed
    /// where the published one is absent or invalid.
    pub fn from_chunks(index: &CorpusIndex, chunks: Vec<CardChunk>) -> Corpus {
        let mut cards = HashMap::with_capacity(index.card_count);
        for chunk in chunks {
            cards.extend(chunk.cards);
        }
        if cards.len() != index.card_count {
            tracing::warn!(
                expected = index.card_count,
                actual = cards.len(),
                "corpus card count does not match index"
            );
        }
        let mut corpus = Corpus {
            cards,
            oracle_printings: HashMap::new(),
            canonical: HashMap::new(),
        };
        corpus.rebuild_indexes(&index.canonical_printing_by_oracle_id);
        corpus
    }

    /// Derive oracle groups from the card map, ordered by canonical
    /// preference, and fill the canonical index. `published` entries win
    /// when they are still valid (printing present, same oracle, not an
    /// art-series layout).
    fn rebuild_indexes(&mut self, published: &HashMap<Uuid, Uuid>) {
        let mut groups: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for card in self.cards.values() {
            groups.entry(card.oracle_id).or_default().push(card.id);
        }
        for printings in groups.values_mut() {
            printings.sort_by(|a, b| canonical_order(&self.cards[a], &self.cards[b]));
        }

        let mut canonical = HashMap::with_capacity(groups.len());
        for (oracle_id, printings) in &groups {
            let from_index = published.get(oracle_id).filter(|id| {
                self.cards
                    .get(id)
                    .is_some_and(|c| c.oracle_id == *oracle_id && c.layout != Layout::ArtSeries)
            });
            let chosen = match from_index {
                Some(id) => Some(*id),
                None => {
                    pick_canonical(printings.iter().map(|id| &self.cards[id])).map(|c| c.id)
                }
            };
            if let Some(id) = chosen {
                canonical.insert(*oracle_id, id);
            }
        }

        self.oracle_printings = groups;
        self.canonical = canonical;
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate every printing in the corpus.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Iterate the canonical printing of every oracle group.
    pub fn canonical_cards(&self) -> impl Iterator<Item = &Card> {
        self.canonical.values().filter_map(|id| self.cards.get(id))
    }
}

impl CardAccess for Corpus {
    fn card(&self, id: &Uuid) -> Option<&Card> {
        self.cards.get(id)
    }

    fn printings(&self, oracle_id: &Uuid) -> &[Uuid] {
        self.oracle_printings
            .get(oracle_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn canonical_printing(&self, oracle_id: &Uuid) -> Option<Uuid> {
        self.canonical.get(oracle_id).copied()
    }
}
