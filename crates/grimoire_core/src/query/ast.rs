use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::corpus::Colors;

/// Byte range into the original query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }
}

/// A query that could not be parsed, with the offending range highlighted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> ParseError {
        ParseError {
            message: message.into(),
            span,
        }
    }
}

/// Searchable card fields. Each name in the query language, including all
/// synonyms, resolves to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Oracle,
    TypeLine,
    ManaCost,
    ManaValue,
    Power,
    Toughness,
    Loyalty,
    Defense,
    Colors,
    ColorIdentity,
    Rarity,
    Set,
    SetType,
    CollectorNumber,
    Artist,
    Language,
    FrameYear,
    ReleaseYear,
    ReleaseDate,
    Format,
    Layout,
    Games,
    Border,
    Stamp,
    Flavor,
    Is,
}

/// How a field's values are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldClass {
    /// Case-insensitive substring / exact / regex over card text.
    Substring,
    /// Full comparison operators over a numeric extraction.
    Numeric,
    /// Case-insensitive exact match (regex may still partial-match).
    Discrete,
    /// Discrete plus the fixed rarity ordering.
    Rarity,
    /// Color-set algebra.
    ColorSet,
    /// Legality lookup.
    Format,
    /// Release-date comparison.
    Date,
    /// Named cardpool predicate.
    Is,
    /// Mana-symbol multiset matching.
    Mana,
}

impl Field {
    pub fn from_name(name: &str) -> Option<Field> {
        match name.to_ascii_lowercase().as_str() {
            "n" | "name" => Some(Field::Name),
            "o" | "oracle" => Some(Field::Oracle),
            "t" | "type" => Some(Field::TypeLine),
            "m" | "mana" => Some(Field::ManaCost),
            "mv" | "cmc" | "manavalue" => Some(Field::ManaValue),
            "pow" | "power" => Some(Field::Power),
            "tou" | "toughness" => Some(Field::Toughness),
            "loy" | "loyalty" => Some(Field::Loyalty),
            "def" | "defense" => Some(Field::Defense),
            "c" | "color" => Some(Field::Colors),
            "id" | "identity" => Some(Field::ColorIdentity),
            "r" | "rarity" => Some(Field::Rarity),
            "s" | "set" | "e" | "edition" => Some(Field::Set),
            "st" | "settype" => Some(Field::SetType),
            "cn" | "number" => Some(Field::CollectorNumber),
            "a" | "artist" => Some(Field::Artist),
            "lang" => Some(Field::Language),
            "frame" => Some(Field::FrameYear),
            "year" => Some(Field::ReleaseYear),
            "date" => Some(Field::ReleaseDate),
            "f" | "format" | "legal" => Some(Field::Format),
            "layout" => Some(Field::Layout),
            "game" => Some(Field::Games),
            "border" => Some(Field::Border),
            "stamp" => Some(Field::Stamp),
            "ft" | "flavor" => Some(Field::Flavor),
            "is" => Some(Field::Is),
            _ => None,
        }
    }

    /// Fields that vary between printings of the same oracle card.
    /// Mentioning one switches the evaluator to printing scope.
    pub fn printing_scoped(self) -> bool {
        matches!(
            self,
            Field::Set
                | Field::SetType
                | Field::CollectorNumber
                | Field::Artist
                | Field::Language
                | Field::FrameYear
                | Field::ReleaseYear
                | Field::ReleaseDate
                | Field::Rarity
        )
    }

    pub(crate) fn class(self) -> FieldClass {
        match self {
            Field::Name | Field::Oracle | Field::TypeLine | Field::Flavor | Field::Artist => {
                FieldClass::Substring
            }
            Field::ManaValue
            | Field::Power
            | Field::Toughness
            | Field::Loyalty
            | Field::Defense
            | Field::FrameYear
            | Field::ReleaseYear => FieldClass::Numeric,
            Field::Layout
            | Field::Set
            | Field::SetType
            | Field::CollectorNumber
            | Field::Language
            | Field::Games
            | Field::Border
            | Field::Stamp => FieldClass::Discrete,
            Field::Rarity => FieldClass::Rarity,
            Field::Colors | Field::ColorIdentity => FieldClass::ColorSet,
            Field::Format => FieldClass::Format,
            Field::ReleaseDate => FieldClass::Date,
            Field::Is => FieldClass::Is,
            Field::ManaCost => FieldClass::Mana,
        }
    }
}

/// Comparison operator in a field clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Colon,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Colon => ":",
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Lt => "<",
            Op::Le => "<=",
            Op::Gt => ">",
            Op::Ge => ">=",
        }
    }
}

/// A clause value, typed during parsing so evaluation is total.
#[derive(Debug, Clone)]
pub enum Value {
    Text(String),
    Number(f64),
    ColorSet(Colors),
    Date(NaiveDate),
    Regex(Regex),
}

/// One `field OP value` clause, with its span for error reporting.
#[derive(Debug, Clone)]
pub struct FieldClause {
    pub field: Field,
    pub op: Op,
    pub value: Value,
    pub span: Span,
}

/// Parsed query expression.
#[derive(Debug, Clone)]
pub enum Expr {
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    Field(FieldClause),
    Name(String),
    ExactName(String),
}

impl Expr {
    /// Whether any clause in the tree touches a printing-scoped field.
    pub fn mentions_printing_field(&self) -> bool {
        match self {
            Expr::And(parts) | Expr::Or(parts) => {
                parts.iter().any(Expr::mentions_printing_field)
            }
            Expr::Not(inner) => inner.mentions_printing_field(),
            Expr::Field(clause) => clause.field.printing_scoped(),
            Expr::Name(_) | Expr::ExactName(_) => false,
        }
    }
}

/// A parsed query. `expr` is `None` for empty or whitespace-only input,
/// which matches nothing.
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub expr: Option<Expr>,
}

impl Query {
    /// The bare name text when the whole query is a single name clause —
    /// the trigger for the fuzzy search path.
    pub fn as_bare_name(&self) -> Option<&str> {
        match &self.expr {
            Some(Expr::Name(name)) => Some(name),
            _ => None,
        }
    }
}
