use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deck zone a card entry sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Commander,
    Mainboard,
    Sideboard,
    Maybeboard,
}

/// One deck slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckEntry {
    pub printing: Uuid,
    pub oracle: Uuid,
    pub section: Section,
    pub quantity: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A deck under validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub cards: Vec<DeckEntry>,
}

/// Rule family, used for grouping in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Legality,
    Quantity,
    Identity,
    Structure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Every validation rule. Each has a stable number for display and a
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    FormatLegality,
    RestrictedCopies,
    MainboardCommons,
    CommanderUncommon,
    CopyLimit,
    Singleton,
    DeckSize,
    SideboardSize,
    CommanderCount,
    CommanderEligibility,
    PlaneswalkerCommander,
    SignatureSpell,
    Companion,
    ColorIdentity,
}

impl RuleId {
    pub fn number(self) -> u32 {
        match self {
            RuleId::FormatLegality => 100,
            RuleId::RestrictedCopies => 101,
            RuleId::MainboardCommons => 102,
            RuleId::CommanderUncommon => 103,
            RuleId::CopyLimit => 200,
            RuleId::Singleton => 201,
            RuleId::DeckSize => 300,
            RuleId::SideboardSize => 301,
            RuleId::CommanderCount => 302,
            RuleId::CommanderEligibility => 303,
            RuleId::PlaneswalkerCommander => 304,
            RuleId::SignatureSpell => 305,
            RuleId::Companion => 306,
            RuleId::ColorIdentity => 400,
        }
    }

    pub fn category(self) -> RuleCategory {
        match self {
            RuleId::FormatLegality
            | RuleId::RestrictedCopies
            | RuleId::MainboardCommons
            | RuleId::CommanderUncommon => RuleCategory::Legality,
            RuleId::CopyLimit | RuleId::Singleton => RuleCategory::Quantity,
            RuleId::DeckSize
            | RuleId::SideboardSize
            | RuleId::CommanderCount
            | RuleId::CommanderEligibility
            | RuleId::PlaneswalkerCommander
            | RuleId::SignatureSpell
            | RuleId::Companion => RuleCategory::Structure,
            RuleId::ColorIdentity => RuleCategory::Identity,
        }
    }
}

/// One rule failure. Maybeboard findings are warnings and never invalidate
/// the deck.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub rule: RuleId,
    pub rule_number: u32,
    pub category: RuleCategory,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl Violation {
    pub(crate) fn new(rule: RuleId, severity: Severity, message: impl Into<String>) -> Violation {
        Violation {
            rule,
            rule_number: rule.number(),
            category: rule.category(),
            severity,
            message: message.into(),
            card_name: None,
            oracle_id: None,
            section: None,
            quantity: None,
        }
    }
}

/// Validation outcome: flat violation list plus per-card and per-rule
/// indexes into it.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub violations: Vec<Violation>,
    pub by_card: HashMap<Uuid, Vec<usize>>,
    pub by_rule: HashMap<RuleId, Vec<usize>>,
}
