use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::corpus::{Card, CardAccess, Color, Colors, Game, Legality, Rarity};

use super::presets::PresetConfig;
use super::types::{Deck, DeckEntry, RuleId, Section, Severity, Violation};

/// Everything a rule can see. Entries whose printing is missing from the
/// corpus are skipped silently.
pub(crate) struct RuleContext<'a, C: CardAccess> {
    pub deck: &'a Deck,
    pub store: &'a C,
    pub config: &'a PresetConfig,
}

impl<'a, C: CardAccess> RuleContext<'a, C> {
    fn resolved(&self) -> Vec<(&'a DeckEntry, &'a Card)> {
        self.deck
            .cards
            .iter()
            .filter_map(|entry| {
                let card = self.store.card(&entry.printing);
                if card.is_none() {
                    tracing::debug!(printing = %entry.printing, "deck entry missing from corpus");
                }
                card.map(|card| (entry, card))
            })
            .collect()
    }

    fn in_sections(&self, sections: &[Section]) -> Vec<(&'a DeckEntry, &'a Card)> {
        self.resolved()
            .into_iter()
            .filter(|(entry, _)| sections.contains(&entry.section))
            .collect()
    }

    fn commanders(&self) -> Vec<(&'a DeckEntry, &'a Card)> {
        self.in_sections(&[Section::Commander])
    }

    /// Commander-zone cards that define the deck's color identity. In
    /// oathbreaker the signature spell shares the zone but is not a
    /// commander.
    fn identity_commanders(&self) -> Vec<(&'a DeckEntry, &'a Card)> {
        self.commanders()
            .into_iter()
            .filter(|(_, card)| {
                !card.type_line_has("Instant") && !card.type_line_has("Sorcery")
            })
            .collect()
    }
}

fn severity_for(section: Section) -> Severity {
    if section == Section::Maybeboard {
        Severity::Warning
    } else {
        Severity::Error
    }
}

fn card_violation(
    rule: RuleId,
    entry: &DeckEntry,
    card: &Card,
    message: impl Into<String>,
) -> Violation {
    let mut violation = Violation::new(rule, severity_for(entry.section), message);
    violation.card_name = Some(card.name.clone());
    violation.oracle_id = Some(entry.oracle);
    violation.section = Some(entry.section);
    violation
}

/// Per-oracle quantity totals with a representative entry for reporting.
fn oracle_totals<'a>(
    entries: &[(&'a DeckEntry, &'a Card)],
) -> HashMap<Uuid, (u32, &'a DeckEntry, &'a Card)> {
    let mut totals: HashMap<Uuid, (u32, &'a DeckEntry, &'a Card)> = HashMap::new();
    for &(entry, card) in entries {
        totals
            .entry(entry.oracle)
            .and_modify(|(count, _, _)| *count += entry.quantity)
            .or_insert((entry.quantity, entry, card));
    }
    totals
}

fn quantity_total(entries: &[(&DeckEntry, &Card)]) -> u32 {
    entries.iter().map(|(entry, _)| entry.quantity).sum()
}

pub(crate) fn run<C: CardAccess>(rule: RuleId, ctx: &RuleContext<C>) -> Vec<Violation> {
    match rule {
        RuleId::FormatLegality => format_legality(ctx),
        RuleId::RestrictedCopies => restricted_copies(ctx),
        RuleId::MainboardCommons => mainboard_commons(ctx),
        RuleId::CommanderUncommon => commander_uncommon(ctx),
        RuleId::CopyLimit => copy_rule(ctx, RuleId::CopyLimit, 4),
        RuleId::Singleton => copy_rule(ctx, RuleId::Singleton, 1),
        RuleId::DeckSize => deck_size(ctx),
        RuleId::SideboardSize => sideboard_size(ctx),
        RuleId::CommanderCount => commander_count(ctx),
        RuleId::CommanderEligibility => commander_eligibility(ctx),
        RuleId::PlaneswalkerCommander => planeswalker_commander(ctx),
        RuleId::SignatureSpell => signature_spell(ctx),
        RuleId::Companion => companion(ctx),
        RuleId::ColorIdentity => color_identity(ctx),
    }
}

fn format_legality<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let format = &ctx.config.legality_field;
    let mut violations = Vec::new();
    for (entry, card) in ctx.resolved() {
        match card.legality(format) {
            Legality::Legal | Legality::Restricted => {}
            Legality::Banned => violations.push(card_violation(
                RuleId::FormatLegality,
                entry,
                card,
                format!("{} is banned in {format}", card.name),
            )),
            Legality::NotLegal => violations.push(card_violation(
                RuleId::FormatLegality,
                entry,
                card,
                format!("{} is not legal in {format}", card.name),
            )),
        }
    }
    violations
}

fn restricted_copies<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let format = &ctx.config.legality_field;
    let played = ctx.in_sections(&[Section::Commander, Section::Mainboard, Section::Sideboard]);
    let mut violations = Vec::new();
    for (total, entry, card) in oracle_totals(&played).into_values() {
        if card.legality(format) == Legality::Restricted && total > 1 {
            let mut violation = card_violation(
                RuleId::RestrictedCopies,
                entry,
                card,
                format!("{} is restricted in {format}: limit one copy, found {total}", card.name),
            );
            violation.quantity = Some(total);
            violations.push(violation);
        }
    }
    violations
}

static ANY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)a deck can have any number of cards named").expect("pattern"));
static UP_TO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)a deck can have up to (\w+) cards named").expect("pattern"));

fn count_word(word: &str) -> Option<u32> {
    if let Ok(number) = word.parse() {
        return Some(number);
    }
    let words = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve", "thirteen", "fourteen", "fifteen",
    ];
    words
        .iter()
        .position(|w| w.eq_ignore_ascii_case(word))
        .map(|index| index as u32 + 1)
}

/// The number of copies a card allows, `None` meaning unlimited. Basic
/// lands and "any number" cards are uncapped; "up to N cards named" text
/// raises the cap to N.
fn copy_cap(card: &Card, default_cap: u32) -> Option<u32> {
    if card.type_line_has("Basic") {
        return None;
    }
    let text: String = card.oracle_texts().collect::<Vec<_>>().join("\n");
    if ANY_NUMBER.is_match(&text) {
        return None;
    }
    if let Some(captures) = UP_TO.captures(&text) {
        return Some(count_word(&captures[1]).unwrap_or(default_cap));
    }
    Some(default_cap)
}

fn copy_rule<C: CardAccess>(ctx: &RuleContext<C>, rule: RuleId, default_cap: u32) -> Vec<Violation> {
    let played = ctx.in_sections(&[Section::Commander, Section::Mainboard, Section::Sideboard]);
    let mut violations = Vec::new();
    for (total, entry, card) in oracle_totals(&played).into_values() {
        let Some(cap) = copy_cap(card, default_cap) else {
            continue;
        };
        if total > cap {
            let mut violation = card_violation(
                rule,
                entry,
                card,
                format!("{}: {total} copies exceeds the limit of {cap}", card.name),
            );
            violation.quantity = Some(total);
            violations.push(violation);
        }
    }
    violations
}

fn deck_size<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let main = ctx.in_sections(&[Section::Commander, Section::Mainboard]);
    let total = quantity_total(&main);
    if let Some(exact) = ctx.config.deck_size {
        if total != exact {
            return vec![Violation::new(
                RuleId::DeckSize,
                Severity::Error,
                format!("deck must contain exactly {exact} cards, found {total}"),
            )];
        }
    } else if let Some(minimum) = ctx.config.min_deck_size {
        if total < minimum {
            return vec![Violation::new(
                RuleId::DeckSize,
                Severity::Error,
                format!("deck must contain at least {minimum} cards, found {total}"),
            )];
        }
    }
    Vec::new()
}

fn sideboard_size<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let Some(limit) = ctx.config.sideboard_size else {
        return Vec::new();
    };
    let total = quantity_total(&ctx.in_sections(&[Section::Sideboard]));
    if total > limit {
        return vec![Violation::new(
            RuleId::SideboardSize,
            Severity::Error,
            format!("sideboard may contain at most {limit} cards, found {total}"),
        )];
    }
    Vec::new()
}

fn has_keyword(card: &Card, keyword: &str) -> bool {
    card.keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword))
}

static PARTNER_WITH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)partner with ([^(\n]+)").expect("pattern"));

fn partner_with_target(card: &Card) -> Option<String> {
    card.oracle_texts()
        .find_map(|text| PARTNER_WITH.captures(text))
        .map(|captures| captures[1].trim().to_string())
}

fn has_generic_partner(card: &Card) -> bool {
    partner_with_target(card).is_none()
        && (has_keyword(card, "Partner") || card.oracle_text_has("partner ("))
}

fn partners_with(a: &Card, b: &Card) -> bool {
    partner_with_target(a)
        .is_some_and(|target| b.names().any(|name| name.eq_ignore_ascii_case(&target)))
}

fn chooses_background(card: &Card) -> bool {
    card.oracle_text_has("choose a background")
}

fn is_background(card: &Card) -> bool {
    card.type_line_has("Background")
}

fn doctors_companion(card: &Card) -> bool {
    has_keyword(card, "Doctor's companion") || card.oracle_text_has("doctor's companion")
}

fn is_time_lord_doctor(card: &Card) -> bool {
    card.type_line_has("Time Lord") && card.type_line_has("Doctor")
}

fn can_pair(a: &Card, b: &Card) -> bool {
    (has_generic_partner(a) && has_generic_partner(b))
        || (card_has_friends_forever(a) && card_has_friends_forever(b))
        || (partners_with(a, b) && partners_with(b, a))
        || (chooses_background(a) && is_background(b))
        || (chooses_background(b) && is_background(a))
        || (doctors_companion(a) && is_time_lord_doctor(b))
        || (doctors_companion(b) && is_time_lord_doctor(a))
}

fn card_has_friends_forever(card: &Card) -> bool {
    has_keyword(card, "Friends forever") || card.oracle_text_has("friends forever")
}

fn commander_count<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let commanders = ctx.commanders();
    let total = quantity_total(&commanders);
    match total {
        0 => vec![Violation::new(
            RuleId::CommanderCount,
            Severity::Error,
            "deck has no commander",
        )],
        1 => Vec::new(),
        2 if commanders.len() == 2 => {
            let (_, first) = commanders[0];
            let (_, second) = commanders[1];
            if can_pair(first, second) {
                Vec::new()
            } else {
                vec![Violation::new(
                    RuleId::CommanderCount,
                    Severity::Error,
                    format!("{} and {} cannot be paired as commanders", first.name, second.name),
                )]
            }
        }
        _ => vec![Violation::new(
            RuleId::CommanderCount,
            Severity::Error,
            format!("deck has too many commanders: found {total}"),
        )],
    }
}

fn front_type_line(card: &Card) -> &str {
    card.front_face()
        .and_then(|face| face.type_line.as_deref())
        .unwrap_or(&card.type_line)
}

fn printed_stats(card: &Card) -> bool {
    let face = card.front_face();
    let power = card.power.as_deref().or(face.and_then(|f| f.power.as_deref()));
    let toughness = card
        .toughness
        .as_deref()
        .or(face.and_then(|f| f.toughness.as_deref()));
    power.is_some() && toughness.is_some()
}

fn commander_eligible(card: &Card) -> bool {
    if card.oracle_text_has("can be your commander") {
        return true;
    }
    let front = front_type_line(card);
    if !front.contains("Legendary") {
        return false;
    }
    if front.contains("Creature") {
        return true;
    }
    // spacecraft qualify only with a printed power and toughness
    if front.contains("Spacecraft") {
        return printed_stats(card);
    }
    false
}

fn commander_eligibility<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let commanders = ctx.commanders();
    let mut violations = Vec::new();
    for (entry, card) in &commanders {
        // a Background is only valid beside a "Choose a Background" commander
        if is_background(card) {
            let paired = commanders.len() == 2
                && commanders
                    .iter()
                    .any(|(_, other)| chooses_background(other));
            if !paired {
                violations.push(card_violation(
                    RuleId::CommanderEligibility,
                    entry,
                    card,
                    format!("{} requires a commander that chooses a Background", card.name),
                ));
            }
            continue;
        }
        if !commander_eligible(card) {
            violations.push(card_violation(
                RuleId::CommanderEligibility,
                entry,
                card,
                format!("{} cannot be your commander", card.name),
            ));
        }
    }
    violations
}

fn planeswalker_commander<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let walkers: u32 = ctx
        .commanders()
        .iter()
        .filter(|(_, card)| card.type_line_has("Planeswalker"))
        .map(|(entry, _)| entry.quantity)
        .sum();
    if walkers != 1 {
        return vec![Violation::new(
            RuleId::PlaneswalkerCommander,
            Severity::Error,
            format!("deck must have exactly one planeswalker commander, found {walkers}"),
        )];
    }
    Vec::new()
}

fn signature_spell<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let spells: u32 = ctx
        .commanders()
        .iter()
        .filter(|(_, card)| card.type_line_has("Instant") || card.type_line_has("Sorcery"))
        .map(|(entry, _)| entry.quantity)
        .sum();
    if spells != 1 {
        return vec![Violation::new(
            RuleId::SignatureSpell,
            Severity::Error,
            format!("deck must have exactly one signature spell, found {spells}"),
        )];
    }
    Vec::new()
}

fn has_printing_at_rarity<C: CardAccess>(store: &C, oracle: &Uuid, rarity: Rarity) -> bool {
    store.printings(oracle).iter().any(|id| {
        store.card(id).is_some_and(|printing| {
            printing.rarity == rarity
                && printing
                    .games
                    .iter()
                    .any(|game| matches!(game, Game::Paper | Game::Mtgo))
        })
    })
}

fn commander_uncommon<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    ctx.identity_commanders()
        .into_iter()
        .filter(|(entry, _)| !has_printing_at_rarity(ctx.store, &entry.oracle, Rarity::Uncommon))
        .map(|(entry, card)| {
            card_violation(
                RuleId::CommanderUncommon,
                entry,
                card,
                format!("{} has no uncommon printing in paper or Magic Online", card.name),
            )
        })
        .collect()
}

fn mainboard_commons<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let main = ctx.in_sections(&[Section::Mainboard]);
    let mut violations = Vec::new();
    for (_, entry, card) in oracle_totals(&main).into_values() {
        if !has_printing_at_rarity(ctx.store, &entry.oracle, Rarity::Common) {
            violations.push(card_violation(
                RuleId::MainboardCommons,
                entry,
                card,
                format!("{} has no common printing in paper or Magic Online", card.name),
            ));
        }
    }
    violations
}

const BASIC_TYPE_COLORS: [(&str, Color); 5] = [
    ("Plains", Color::White),
    ("Island", Color::Blue),
    ("Swamp", Color::Black),
    ("Mountain", Color::Red),
    ("Forest", Color::Green),
];

/// Color identity including face colors and the colors implied by basic
/// land types on any face.
fn combined_identity(card: &Card) -> Colors {
    let mut identity = card.color_identity;
    for face in &card.faces {
        identity = identity.union(face.colors);
    }
    for type_line in card.type_lines() {
        for (basic, color) in BASIC_TYPE_COLORS {
            if type_line.contains(basic) {
                identity.insert(color);
            }
        }
    }
    identity
}

fn color_identity<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let commanders = ctx.identity_commanders();
    if commanders.is_empty() {
        return Vec::new();
    }
    let allowed = commanders
        .iter()
        .fold(Colors::EMPTY, |union, (_, card)| union.union(combined_identity(card)));

    let mut violations = Vec::new();
    for (entry, card) in ctx.resolved() {
        if entry.section == Section::Commander
            && !card.type_line_has("Instant")
            && !card.type_line_has("Sorcery")
        {
            continue;
        }
        let missing = combined_identity(card).difference(allowed);
        if !missing.is_empty() {
            violations.push(card_violation(
                RuleId::ColorIdentity,
                entry,
                card,
                format!("{} not in {}", missing.letters(), allowed.letters()),
            ));
        }
    }
    violations
}

fn is_permanent_type(card: &Card) -> bool {
    ["Creature", "Artifact", "Enchantment", "Land", "Planeswalker", "Battle"]
        .iter()
        .any(|t| card.type_line_has(t))
}

fn is_companion_card(card: &Card) -> bool {
    has_keyword(card, "Companion") || card.oracle_text_has("companion —")
}

fn repeated_colored_symbol(cost: &str) -> bool {
    ["{W}", "{U}", "{B}", "{R}", "{G}"]
        .iter()
        .any(|symbol| cost.matches(symbol).count() > 1)
}

/// Deck-wide companion restrictions, matched by companion name.
fn companion_offender(
    companion: &Card,
    main: &[(&DeckEntry, &Card)],
    config: &PresetConfig,
) -> Option<String> {
    let nonland = |card: &Card| !card.type_line_has("Land");
    let name = companion.name.as_str();

    if name.starts_with("Lurrus") {
        return main
            .iter()
            .find(|(_, card)| is_permanent_type(card) && card.cmc > 2.0)
            .map(|(_, card)| format!("{} is a permanent with mana value greater than 2", card.name));
    }
    if name.starts_with("Yorion") {
        let needed = config.deck_size.or(config.min_deck_size).unwrap_or(60) + 20;
        let total = quantity_total(main);
        return (total < needed)
            .then(|| format!("deck needs at least {needed} cards, found {total}"));
    }
    if name.starts_with("Gyruda") {
        return main
            .iter()
            .find(|(_, card)| nonland(card) && card.cmc % 2.0 != 0.0)
            .map(|(_, card)| format!("{} has an odd mana value", card.name));
    }
    if name.starts_with("Jegantha") {
        return main
            .iter()
            .find(|(_, card)| {
                card.mana_cost
                    .as_deref()
                    .is_some_and(repeated_colored_symbol)
            })
            .map(|(_, card)| format!("{} repeats a colored mana symbol", card.name));
    }
    if name.starts_with("Kaheera") {
        let tribes = ["Cat", "Elemental", "Nightmare", "Dinosaur", "Beast"];
        return main
            .iter()
            .find(|(_, card)| {
                card.type_line_has("Creature") && !tribes.iter().any(|t| card.type_line_has(t))
            })
            .map(|(_, card)| format!("{} is a creature outside the allowed types", card.name));
    }
    if name.starts_with("Keruga") {
        return main
            .iter()
            .find(|(_, card)| nonland(card) && card.cmc < 3.0)
            .map(|(_, card)| format!("{} has mana value less than 3", card.name));
    }
    if name.starts_with("Lutri") {
        let nonland_entries: Vec<_> = main
            .iter()
            .filter(|(_, card)| nonland(card))
            .copied()
            .collect();
        return oracle_totals(&nonland_entries)
            .into_values()
            .find(|(total, _, _)| *total > 1)
            .map(|(_, _, card)| format!("{} appears more than once", card.name));
    }
    if name.starts_with("Obosh") {
        return main
            .iter()
            .find(|(_, card)| nonland(card) && card.cmc % 2.0 == 0.0)
            .map(|(_, card)| format!("{} has an even mana value", card.name));
    }
    if name.starts_with("Umori") {
        let types = ["Artifact", "Creature", "Enchantment", "Instant", "Planeswalker", "Sorcery", "Battle"];
        let shared = main
            .iter()
            .filter(|(_, card)| nonland(card))
            .fold(None::<Vec<&str>>, |shared, (_, card)| {
                let mine: Vec<&str> = types
                    .iter()
                    .filter(|t| card.type_line_has(t))
                    .copied()
                    .collect();
                Some(match shared {
                    None => mine,
                    Some(previous) => previous.into_iter().filter(|t| mine.contains(t)).collect(),
                })
            });
        return match shared {
            Some(shared) if shared.is_empty() => {
                Some("nonland cards do not share a card type".to_string())
            }
            _ => None,
        };
    }
    if name.starts_with("Zirda") {
        return main
            .iter()
            .find(|(_, card)| {
                is_permanent_type(card)
                    && !card.type_line_has("Basic")
                    && !card.oracle_texts().any(|text| text.contains(':'))
            })
            .map(|(_, card)| format!("{} has no activated ability", card.name));
    }
    None
}

fn companion<C: CardAccess>(ctx: &RuleContext<C>) -> Vec<Violation> {
    let main = ctx.in_sections(&[Section::Mainboard]);
    let mut violations = Vec::new();
    for (entry, card) in ctx.in_sections(&[Section::Sideboard]) {
        if !is_companion_card(card) {
            continue;
        }
        if let Some(reason) = companion_offender(card, &main, ctx.config) {
            violations.push(card_violation(
                RuleId::Companion,
                entry,
                card,
                format!("{}: {reason}", card.name),
            ));
        }
    }
    violations
}
