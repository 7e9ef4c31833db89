pub mod corpus;
pub mod fuzzy;
pub mod query;
pub mod search;
pub mod validator;
pub mod volatile;
pub mod worker;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export the worker surface for easy access from embedders
pub use worker::{
    CardWorker, CardWorkerBuilder, SyntaxSearchResult, WorkerConfig, WorkerError,
};

// Re-export the card model and corpus contracts
pub use corpus::{
    Card, CardAccess, CardFace, Color, Colors, Corpus, Game, ImageStatus, Layout, Legality,
    Rarity,
};

// Re-export query types for callers that drive the parser directly
pub use query::{parse, ParseError, Query, SortDir, SortField, SortSpec, Span};

// Re-export search types
pub use search::{PaginatedResult, Restrictions, SearchMode};

// Re-export deck validation types
pub use validator::{
    validate, Deck, DeckEntry, RuleCategory, RuleId, Section, Severity, ValidateOptions,
    ValidationReport, Violation,
};

// Re-export the volatile codec
pub use volatile::{VolatileError, VolatileRecord};
