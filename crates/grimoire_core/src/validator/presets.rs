use super::types::RuleId;

/// Numbers a preset's structural rules check against, plus the key used to
/// read card legalities.
#[derive(Debug, Clone)]
pub struct PresetConfig {
    pub legality_field: String,
    pub min_deck_size: Option<u32>,
    pub deck_size: Option<u32>,
    pub sideboard_size: Option<u32>,
}

/// The rule set and configuration for one format.
#[derive(Debug, Clone)]
pub struct FormatPreset {
    pub rules: Vec<RuleId>,
    pub config: PresetConfig,
}

fn constructed(legality_field: &str) -> FormatPreset {
    FormatPreset {
        rules: vec![
            RuleId::FormatLegality,
            RuleId::CopyLimit,
            RuleId::DeckSize,
            RuleId::SideboardSize,
            RuleId::Companion,
        ],
        config: PresetConfig {
            legality_field: legality_field.to_string(),
            min_deck_size: Some(60),
            deck_size: None,
            sideboard_size: Some(15),
        },
    }
}

fn commander_style(legality_field: &str, deck_size: u32) -> FormatPreset {
    FormatPreset {
        rules: vec![
            RuleId::FormatLegality,
            RuleId::Singleton,
            RuleId::DeckSize,
            RuleId::CommanderCount,
            RuleId::CommanderEligibility,
            RuleId::ColorIdentity,
            RuleId::Companion,
        ],
        config: PresetConfig {
            legality_field: legality_field.to_string(),
            min_deck_size: None,
            deck_size: Some(deck_size),
            sideboard_size: None,
        },
    }
}

/// Resolve a format name to its preset. Unknown names fall back to the
/// kitchen-table preset, which checks nothing.
pub fn preset_for(format: &str) -> FormatPreset {
    let normalized: String = format
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();

    match normalized.as_str() {
        "standard" | "pioneer" | "modern" | "legacy" | "pauper" | "premodern" | "oldschool"
        | "historic" | "alchemy" | "explorer" | "timeless" => constructed(&normalized),
        "vintage" => {
            let mut preset = constructed("vintage");
            preset.rules.insert(1, RuleId::RestrictedCopies);
            preset
        }
        "commander" | "edh" => commander_style("commander", 100),
        "brawl" | "historicbrawl" => commander_style("brawl", 100),
        "standardbrawl" => commander_style("standardbrawl", 60),
        "paupercommander" | "pdh" => {
            let mut preset = commander_style("paupercommander", 100);
            preset
                .rules
                .retain(|rule| *rule != RuleId::CommanderEligibility);
            preset.rules.push(RuleId::CommanderUncommon);
            preset.rules.push(RuleId::MainboardCommons);
            preset
        }
        "oathbreaker" => FormatPreset {
            rules: vec![
                RuleId::FormatLegality,
                RuleId::Singleton,
                RuleId::DeckSize,
                RuleId::PlaneswalkerCommander,
                RuleId::SignatureSpell,
                RuleId::ColorIdentity,
            ],
            config: PresetConfig {
                legality_field: "oathbreaker".to_string(),
                min_deck_size: None,
                deck_size: Some(60),
                sideboard_size: None,
            },
        },
        "draft" | "limited" | "sealed" => FormatPreset {
            rules: vec![RuleId::DeckSize],
            config: PresetConfig {
                legality_field: normalized,
                min_deck_size: Some(40),
                deck_size: None,
                sideboard_size: None,
            },
        },
        _ => FormatPreset {
            rules: Vec::new(),
            config: PresetConfig {
                legality_field: normalized,
                min_deck_size: None,
                deck_size: None,
                sideboard_size: None,
            },
        },
    }
}
