//! The `is:` predicate dictionary: named cardpool tests implemented as
//! type-line and oracle-text pattern matches.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::corpus::{Card, Layout};

const KNOWN: &[&str] = &[
    "creature",
    "land",
    "planeswalker",
    "dfc",
    "mdfc",
    "transform",
    "meld",
    "split",
    "flip",
    "adventure",
    "saga",
    "commander",
    "legendary",
    "historic",
    "permanent",
    "spell",
    "modal",
    "vanilla",
    "frenchvanilla",
    "bear",
    "fetchland",
    "shockland",
    "dual",
    "checkland",
    "fastland",
    "slowland",
    "painland",
    "filterland",
    "bounceland",
    "scryland",
    "gainland",
    "tangoland",
    "canopyland",
    "triome",
];

pub(crate) fn is_known(name: &str) -> bool {
    KNOWN.contains(&name)
}

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($re).expect("predicate pattern compiles"));
    };
}

pattern!(FETCH, r"(?is)pay 1 life, sacrifice.*: search your library");
pattern!(
    SHOCK,
    r"(?is)you may pay 2 life\. if you don't, .* enters (the battlefield )?tapped"
);
pattern!(
    CHECK,
    r"(?is)enters (the battlefield )?tapped unless you control an? (plains|island|swamp|mountain|forest)"
);
pattern!(
    FAST,
    r"(?is)enters (the battlefield )?tapped unless you control two or fewer other lands"
);
pattern!(
    SLOW,
    r"(?is)enters (the battlefield )?tapped unless you control two or more other lands"
);
pattern!(
    TANGO,
    r"(?is)enters (the battlefield )?tapped unless you control two or more basic lands"
);
pattern!(PAIN, r"(?is)\{t\}: add \{c\}");
pattern!(PAIN_DAMAGE, r"(?is)deals 1 damage to you");
pattern!(FILTER, r"(?is)\{[wubrg]/[wubrg]\}, \{t\}: add");
pattern!(BOUNCE, r"(?is)return a land you control to its owner's hand");
pattern!(TAPPED, r"(?is)enters (the battlefield )?tapped");
pattern!(CANOPY, r"(?is)\{t\}, pay 1 life: add");
pattern!(MODAL, r"(?is)choose (one|two|three|four|up to)");

const BASIC_TYPES: [&str; 5] = ["Plains", "Island", "Swamp", "Mountain", "Forest"];

fn oracle_matches(card: &Card, re: &Regex) -> bool {
    card.oracle_texts().any(|text| re.is_match(text))
}

/// Count of distinct basic land types across the card's type lines.
fn basic_type_count(card: &Card) -> usize {
    BASIC_TYPES
        .iter()
        .filter(|basic| card.type_line_has(basic))
        .count()
}

fn is_land(card: &Card) -> bool {
    card.type_line_has("Land")
}

fn is_creature(card: &Card) -> bool {
    card.type_line_has("Creature")
}

fn is_permanent(card: &Card) -> bool {
    ["Creature", "Artifact", "Enchantment", "Land", "Planeswalker", "Battle"]
        .iter()
        .any(|t| card.type_line_has(t))
}

fn front_type_line(card: &Card) -> &str {
    card.front_face()
        .and_then(|f| f.type_line.as_deref())
        .unwrap_or(&card.type_line)
}

fn is_commander(card: &Card) -> bool {
    let front = front_type_line(card);
    let legendary_creature = front.contains("Legendary") && front.contains("Creature");
    legendary_creature || card.oracle_text_has("can be your commander")
}

fn stat_is(stat: Option<&str>, want: &str) -> bool {
    stat == Some(want)
}

/// A creature whose rules text is nothing but keywords from its own
/// keyword list.
fn is_french_vanilla(card: &Card) -> bool {
    if !is_creature(card) || card.keywords.is_empty() {
        return false;
    }
    let mut saw_text = false;
    for text in card.oracle_texts() {
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            saw_text = true;
            let all_keywords = line.split(',').all(|part| {
                let part = part.trim();
                card.keywords.iter().any(|kw| kw.eq_ignore_ascii_case(part))
            });
            if !all_keywords {
                return false;
            }
        }
    }
    saw_text
}

/// Evaluate a predicate from the dictionary. Names are validated at parse
/// time, so an unknown name simply matches nothing.
pub(crate) fn eval(name: &str, card: &Card) -> bool {
    match name {
        "creature" => is_creature(card),
        "land" => is_land(card),
        "planeswalker" => card.type_line_has("Planeswalker"),
        "dfc" => matches!(
            card.layout,
            Layout::Transform | Layout::ModalDfc | Layout::Meld | Layout::DoubleFacedToken
        ),
        "mdfc" => card.layout == Layout::ModalDfc,
        "transform" => card.layout == Layout::Transform,
        "meld" => card.layout == Layout::Meld,
        "split" => card.layout == Layout::Split,
        "flip" => card.layout == Layout::Flip,
        "adventure" => card.layout == Layout::Adventure,
        "saga" => card.type_line_has("Saga"),
        "commander" => is_commander(card),
        "legendary" => card.type_line_has("Legendary"),
        "historic" => {
            card.type_line_has("Legendary")
                || card.type_line_has("Artifact")
                || card.type_line_has("Saga")
        }
        "permanent" => is_permanent(card),
        "spell" => !is_land(card),
        "modal" => oracle_matches(card, &MODAL),
        "vanilla" => is_creature(card) && card.oracle_texts().all(|t| t.trim().is_empty()),
        "frenchvanilla" => is_french_vanilla(card),
        "bear" => {
            is_creature(card)
                && card.cmc == 2.0
                && stat_is(card.power.as_deref(), "2")
                && stat_is(card.toughness.as_deref(), "2")
        }
        "fetchland" => is_land(card) && oracle_matches(card, &FETCH),
        "shockland" => is_land(card) && oracle_matches(card, &SHOCK),
        "dual" => {
            is_land(card)
                && basic_type_count(card) == 2
                && card.oracle_texts().all(|t| t.trim().is_empty())
        }
        "checkland" => is_land(card) && oracle_matches(card, &CHECK),
        "fastland" => is_land(card) && oracle_matches(card, &FAST),
        "slowland" => is_land(card) && oracle_matches(card, &SLOW),
        "painland" => {
            is_land(card) && oracle_matches(card, &PAIN) && oracle_matches(card, &PAIN_DAMAGE)
        }
        "filterland" => is_land(card) && oracle_matches(card, &FILTER),
        "bounceland" => is_land(card) && oracle_matches(card, &BOUNCE),
        "scryland" => {
            is_land(card) && oracle_matches(card, &TAPPED) && card.oracle_text_has("scry 1")
        }
        "gainland" => {
            is_land(card) && oracle_matches(card, &TAPPED) && card.oracle_text_has("you gain 1 life")
        }
        "tangoland" => is_land(card) && oracle_matches(card, &TANGO),
        "canopyland" => {
            is_land(card) && oracle_matches(card, &CANOPY) && card.oracle_text_has("sacrifice")
        }
        "triome" => is_land(card) && basic_type_count(card) >= 3,
        _ => false,
    }
}
