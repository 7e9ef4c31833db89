//! Deck validation: format presets map to rule lists, each rule is a pure
//! function over the deck and the card store, and the outcome is a
//! structured report rather than an error. Cards missing from the corpus
//! are skipped silently.

pub mod presets;
mod rules;
pub mod types;


use std::collections::HashMap;

use crate::corpus::CardAccess;

pub use presets::{preset_for, FormatPreset, PresetConfig};
pub use types::{
    Deck, DeckEntry, RuleCategory, RuleId, Section, Severity, ValidationReport, Violation,
};

/// Validation knobs. The format falls back to the deck's own, then to the
/// kitchen-table preset.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    pub format: Option<String>,
}

/// Validate a deck against its format preset.
pub fn validate<C: CardAccess>(
    deck: &Deck,
    store: &C,
    options: &ValidateOptions,
) -> ValidationReport {
    let format = options
        .format
        .clone()
        .or_else(|| deck.format.clone())
        .unwrap_or_else(|| "casual".to_string());
    let preset = preset_for(&format);
    tracing::debug!(%format, rules = preset.rules.len(), "validating deck");

    let context = rules::RuleContext {
        deck,
        store,
        config: &preset.config,
    };

    let mut violations = Vec::new();
    for rule in &preset.rules {
        violations.extend(rules::run(*rule, &context));
    }

    let mut by_card: HashMap<_, Vec<usize>> = HashMap::new();
    let mut by_rule: HashMap<_, Vec<usize>> = HashMap::new();
    for (index, violation) in violations.iter().enumerate() {
        if let Some(oracle) = violation.oracle_id {
            by_card.entry(oracle).or_default().push(index);
        }
        by_rule.entry(violation.rule).or_default().push(index);
    }

    let valid = violations
        .iter()
        .all(|violation| violation.severity != Severity::Error);

    ValidationReport {
        valid,
        violations,
        by_card,
        by_rule,
    }
}
