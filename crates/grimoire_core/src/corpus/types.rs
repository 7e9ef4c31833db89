use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the five card colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_letter(c: char) -> Option<Color> {
        match c.to_ascii_lowercase() {
            'w' => Some(Color::White),
            'u' => Some(Color::Blue),
            'b' => Some(Color::Black),
            'r' => Some(Color::Red),
            'g' => Some(Color::Green),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Color::White => 1 << 0,
            Color::Blue => 1 << 1,
            Color::Black => 1 << 2,
            Color::Red => 1 << 3,
            Color::Green => 1 << 4,
        }
    }
}

/// A set of colors, stored as a bitmask and serialized as a letter list
/// (`["W", "U"]`). The empty set is colorless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct Colors(u8);

impl Colors {
    pub const EMPTY: Colors = Colors(0);

    pub fn new<I: IntoIterator<Item = Color>>(colors: I) -> Colors {
        let mut set = Colors::EMPTY;
        for color in colors {
            set.insert(color);
        }
        set
    }

    /// Parse a query color value: a run of `wubrg` letters, or `c` for
    /// the empty (colorless) set. `c` cannot be combined with letters.
    pub fn from_letters(s: &str) -> Option<Colors> {
        if s.eq_ignore_ascii_case("c") {
            return Some(Colors::EMPTY);
        }
        let mut set = Colors::EMPTY;
        for ch in s.chars() {
            set.insert(Color::from_letter(ch)?);
        }
        Some(set)
    }

    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    pub fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    pub fn union(self, other: Colors) -> Colors {
        Colors(self.0 | other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_subset(self, other: Colors) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_superset(self, other: Colors) -> bool {
        other.is_subset(self)
    }

    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }

    /// The colors as a `WUBRG`-ordered letter string; empty for colorless.
    pub fn letters(self) -> String {
        self.iter().map(Color::letter).collect()
    }

    /// Colors in `self` that are missing from `other`.
    pub fn difference(self, other: Colors) -> Colors {
        Colors(self.0 & !other.0)
    }
}

impl From<Colors> for Vec<String> {
    fn from(colors: Colors) -> Self {
        colors.iter().map(|c| c.letter().to_string()).collect()
    }
}

impl TryFrom<Vec<String>> for Colors {
    type Error = String;

    fn try_from(letters: Vec<String>) -> Result<Self, Self::Error> {
        let mut set = Colors::EMPTY;
        for letter in &letters {
            let mut chars = letter.chars();
            let color = chars
                .next()
                .filter(|_| chars.next().is_none())
                .and_then(Color::from_letter)
                .ok_or_else(|| format!("invalid color letter: {letter:?}"))?;
            set.insert(color);
        }
        Ok(set)
    }
}

/// Physical layout of a printing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Normal,
    Split,
    Flip,
    Transform,
    ModalDfc,
    Meld,
    Leveler,
    Class,
    Case,
    Saga,
    Adventure,
    Mutate,
    Prototype,
    Battle,
    Planar,
    Scheme,
    Vanguard,
    Token,
    DoubleFacedToken,
    Emblem,
    Augment,
    Host,
    ArtSeries,
    ReversibleCard,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Normal => "normal",
            Layout::Split => "split",
            Layout::Flip => "flip",
            Layout::Transform => "transform",
            Layout::ModalDfc => "modal_dfc",
            Layout::Meld => "meld",
            Layout::Leveler => "leveler",
            Layout::Class => "class",
            Layout::Case => "case",
            Layout::Saga => "saga",
            Layout::Adventure => "adventure",
            Layout::Mutate => "mutate",
            Layout::Prototype => "prototype",
            Layout::Battle => "battle",
            Layout::Planar => "planar",
            Layout::Scheme => "scheme",
            Layout::Vanguard => "vanguard",
            Layout::Token => "token",
            Layout::DoubleFacedToken => "double_faced_token",
            Layout::Emblem => "emblem",
            Layout::Augment => "augment",
            Layout::Host => "host",
            Layout::ArtSeries => "art_series",
            Layout::ReversibleCard => "reversible_card",
        }
    }

    pub fn from_name(s: &str) -> Option<Layout> {
        let lower = s.to_ascii_lowercase();
        [
            Layout::Normal,
            Layout::Split,
            Layout::Flip,
            Layout::Transform,
            Layout::ModalDfc,
            Layout::Meld,
            Layout::Leveler,
            Layout::Class,
            Layout::Case,
            Layout::Saga,
            Layout::Adventure,
            Layout::Mutate,
            Layout::Prototype,
            Layout::Battle,
            Layout::Planar,
            Layout::Scheme,
            Layout::Vanguard,
            Layout::Token,
            Layout::DoubleFacedToken,
            Layout::Emblem,
            Layout::Augment,
            Layout::Host,
            Layout::ArtSeries,
            Layout::ReversibleCard,
        ]
        .into_iter()
        .find(|l| l.as_str() == lower)
    }
}

/// Printing rarity. Order comparisons treat special and bonus as mythic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Special,
    Mythic,
    Bonus,
}

impl Rarity {
    pub fn from_name(s: &str) -> Option<Rarity> {
        match s.to_ascii_lowercase().as_str() {
            "common" | "c" => Some(Rarity::Common),
            "uncommon" | "u" => Some(Rarity::Uncommon),
            "rare" | "r" => Some(Rarity::Rare),
            "special" | "s" => Some(Rarity::Special),
            "mythic" | "m" => Some(Rarity::Mythic),
            "bonus" | "b" => Some(Rarity::Bonus),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Special => "special",
            Rarity::Mythic => "mythic",
            Rarity::Bonus => "bonus",
        }
    }

    /// Rank used for `<`/`>` comparisons: common < uncommon < rare < mythic,
    /// with special and bonus ranking alongside mythic.
    pub fn order_rank(self) -> u8 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Special | Rarity::Mythic | Rarity::Bonus => 3,
        }
    }
}

/// Per-format legality status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Legality {
    Legal,
    #[default]
    NotLegal,
    Banned,
    Restricted,
}

impl Legality {
    /// Whether a card with this status may be played at all in the format.
    pub fn is_playable(self) -> bool {
        matches!(self, Legality::Legal | Legality::Restricted)
    }
}

/// Game clients a printing exists in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Game {
    Paper,
    Mtgo,
    Arena,
}

impl Game {
    pub fn from_name(s: &str) -> Option<Game> {
        match s.to_ascii_lowercase().as_str() {
            "paper" => Some(Game::Paper),
            "mtgo" => Some(Game::Mtgo),
            "arena" => Some(Game::Arena),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Game::Paper => "paper",
            Game::Mtgo => "mtgo",
            Game::Arena => "arena",
        }
    }
}

/// Availability of a printing's image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatus {
    #[default]
    Missing,
    Placeholder,
    Lowres,
    HighresScan,
}

/// One face of a multi-face card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub defense: Option<String>,
    #[serde(default)]
    pub colors: Colors,
}

fn default_lang() -> String {
    "en".to_string()
}

/// A single printing of a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: Uuid,
    pub oracle_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub set: Option<String>,
    #[serde(default)]
    pub set_type: Option<String>,
    #[serde(default)]
    pub collector_number: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub colors: Colors,
    #[serde(default)]
    pub color_identity: Colors,
    #[serde(default)]
    pub type_line: String,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub loyalty: Option<String>,
    #[serde(default)]
    pub defense: Option<String>,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub border_color: Option<String>,
    #[serde(default)]
    pub security_stamp: Option<String>,
    #[serde(default)]
    pub frame: Option<u16>,
    #[serde(default)]
    pub released_at: Option<NaiveDate>,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub legalities: HashMap<String, Legality>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub promo: bool,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub full_art: bool,
    #[serde(default)]
    pub variation: bool,
    #[serde(default)]
    pub image_status: ImageStatus,
    #[serde(default)]
    pub faces: Vec<CardFace>,
}

impl Card {
    pub fn is_english(&self) -> bool {
        self.lang == "en"
    }

    pub fn has_image(&self) -> bool {
        self.image_status != ImageStatus::Missing
    }

    pub fn release_year(&self) -> Option<i32> {
        self.released_at.map(|d| d.year())
    }

    pub fn legality(&self, format: &str) -> Legality {
        self.legalities.get(format).copied().unwrap_or_default()
    }

    /// The front face when the card has faces, otherwise the card itself
    /// viewed as its own front.
    pub fn front_face(&self) -> Option<&CardFace> {
        self.faces.first()
    }

    /// Name plus all face names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.faces.iter().map(|f| f.name.as_str()))
    }

    /// Type line plus all face type lines.
    pub fn type_lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.type_line.as_str())
            .chain(self.faces.iter().filter_map(|f| f.type_line.as_deref()))
    }

    /// Oracle text plus all face texts.
    pub fn oracle_texts(&self) -> impl Iterator<Item = &str> {
        self.oracle_text
            .as_deref()
            .into_iter()
            .chain(self.faces.iter().filter_map(|f| f.oracle_text.as_deref()))
    }

    /// Whether any type line (card or face) contains the given word,
    /// case-insensitively.
    pub fn type_line_has(&self, word: &str) -> bool {
        let needle = word.to_lowercase();
        self.type_lines().any(|t| t.to_lowercase().contains(&needle))
    }

    /// Whether any oracle text (card or face) contains the given phrase,
    /// case-insensitively.
    pub fn oracle_text_has(&self, phrase: &str) -> bool {
        let needle = phrase.to_lowercase();
        self.oracle_texts()
            .any(|t| t.to_lowercase().contains(&needle))
    }
}
