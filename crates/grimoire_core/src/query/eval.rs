use std::cmp::Ordering;
use std::collections::HashMap;

use uuid::Uuid;

use crate::corpus::{canonical_order, Card, Corpus, Layout, Rarity};

use super::ast::{Expr, Field, FieldClause, Op, Query, Value};
use super::predicates;

/// A compiled query predicate.
pub type CardPredicate = Box<dyn Fn(&Card) -> bool + Send + Sync>;

/// Compile an expression into a predicate over cards. Compilation happens
/// once per query; evaluation never fails.
pub fn compile(expr: &Expr) -> CardPredicate {
    match expr {
        Expr::And(parts) => {
            let preds: Vec<CardPredicate> = parts.iter().map(compile).collect();
            Box::new(move |card| preds.iter().all(|p| p(card)))
        }
        Expr::Or(parts) => {
            let preds: Vec<CardPredicate> = parts.iter().map(compile).collect();
            Box::new(move |card| preds.iter().any(|p| p(card)))
        }
        Expr::Not(inner) => {
            let pred = compile(inner);
            Box::new(move |card| !pred(card))
        }
        Expr::Name(name) => {
            let needle = name.to_lowercase();
            Box::new(move |card| card.names().any(|n| n.to_lowercase().contains(&needle)))
        }
        Expr::ExactName(name) => {
            let needle = name.to_lowercase();
            Box::new(move |card| card.names().any(|n| n.to_lowercase() == needle))
        }
        Expr::Field(clause) => compile_clause(clause),
    }
}

/// Execute a parsed query against the corpus. Canonical printings are
/// scanned unless the query mentions a printing-scoped field, in which case
/// every printing is scanned and the results are reduced to the
/// best-scoring matching printing per oracle id. Art-series printings never
/// appear in results.
pub fn execute<'a>(corpus: &'a Corpus, query: &Query) -> Vec<&'a Card> {
    let Some(expr) = &query.expr else {
        return Vec::new();
    };
    let pred = compile(expr);

    if expr.mentions_printing_field() {
        let mut best: HashMap<Uuid, &Card> = HashMap::new();
        for card in corpus.cards() {
            if card.layout == Layout::ArtSeries || !pred(card) {
                continue;
            }
            best.entry(card.oracle_id)
                .and_modify(|current| {
                    if canonical_order(card, current) == Ordering::Less {
                        *current = card;
                    }
                })
                .or_insert(card);
        }
        best.into_values().collect()
    } else {
        corpus.canonical_cards().filter(|card| pred(card)).collect()
    }
}

fn compile_clause(clause: &FieldClause) -> CardPredicate {
    match clause.field {
        Field::Name | Field::Oracle | Field::TypeLine | Field::Flavor | Field::Artist => {
            substring_predicate(clause)
        }
        Field::ManaValue
        | Field::Power
        | Field::Toughness
        | Field::Loyalty
        | Field::Defense
        | Field::FrameYear
        | Field::ReleaseYear => numeric_predicate(clause),
        Field::Layout
        | Field::Set
        | Field::SetType
        | Field::CollectorNumber
        | Field::Language
        | Field::Games
        | Field::Border
        | Field::Stamp => discrete_predicate(clause),
        Field::Rarity => rarity_predicate(clause),
        Field::Colors | Field::ColorIdentity => color_predicate(clause),
        Field::Format => format_predicate(clause),
        Field::ReleaseDate => date_predicate(clause),
        Field::Is => is_predicate(clause),
        Field::ManaCost => mana_predicate(clause),
    }
}

fn substring_texts<'c>(field: Field, card: &'c Card) -> Vec<&'c str> {
    match field {
        Field::Name => card.names().collect(),
        Field::Oracle => card.oracle_texts().collect(),
        Field::TypeLine => card.type_lines().collect(),
        Field::Flavor => card.flavor_text.as_deref().into_iter().collect(),
        Field::Artist => card.artist.as_deref().into_iter().collect(),
        _ => Vec::new(),
    }
}

fn substring_predicate(clause: &FieldClause) -> CardPredicate {
    let field = clause.field;
    match (&clause.value, clause.op) {
        (Value::Regex(re), op) => {
            let re = re.clone();
            let negate = op == Op::Ne;
            Box::new(move |card| {
                negate != substring_texts(field, card).iter().any(|t| re.is_match(t))
            })
        }
        (Value::Text(text), Op::Colon) => {
            let needle = text.to_lowercase();
            Box::new(move |card| {
                substring_texts(field, card)
                    .iter()
                    .any(|t| t.to_lowercase().contains(&needle))
            })
        }
        (Value::Text(text), Op::Eq | Op::Ne) => {
            let needle = text.to_lowercase();
            let negate = clause.op == Op::Ne;
            Box::new(move |card| {
                negate
                    != substring_texts(field, card)
                        .iter()
                        .any(|t| t.to_lowercase() == needle)
            })
        }
        _ => Box::new(|_| false),
    }
}

fn numeric_extract(field: Field, card: &Card) -> Option<f64> {
    match field {
        Field::ManaValue => Some(card.cmc),
        Field::Power => numeric_stat(field, card)?.parse().ok(),
        Field::Toughness => numeric_stat(field, card)?.parse().ok(),
        Field::Loyalty => numeric_stat(field, card)?.parse().ok(),
        Field::Defense => numeric_stat(field, card)?.parse().ok(),
        Field::FrameYear => card.frame.map(f64::from),
        Field::ReleaseYear => card.release_year().map(f64::from),
        _ => None,
    }
}

fn numeric_stat<'c>(field: Field, card: &'c Card) -> Option<&'c str> {
    let face = card.front_face();
    match field {
        Field::Power => card.power.as_deref().or(face.and_then(|f| f.power.as_deref())),
        Field::Toughness => card
            .toughness
            .as_deref()
            .or(face.and_then(|f| f.toughness.as_deref())),
        Field::Loyalty => card
            .loyalty
            .as_deref()
            .or(face.and_then(|f| f.loyalty.as_deref())),
        Field::Defense => card
            .defense
            .as_deref()
            .or(face.and_then(|f| f.defense.as_deref())),
        _ => None,
    }
}

fn numeric_predicate(clause: &FieldClause) -> CardPredicate {
    let field = clause.field;
    let op = clause.op;
    match &clause.value {
        Value::Number(n) => {
            let n = *n;
            Box::new(move |card| match numeric_extract(field, card) {
                Some(v) => match op {
                    Op::Colon | Op::Eq => v == n,
                    Op::Ne => v != n,
                    Op::Lt => v < n,
                    Op::Le => v <= n,
                    Op::Gt => v > n,
                    Op::Ge => v >= n,
                },
                // Missing or non-numeric stats compare as NaN: no match.
                None => false,
            })
        }
        Value::Text(literal) => {
            // `pow=*` and friends: literal equality against the printed stat.
            let literal = literal.clone();
            Box::new(move |card| {
                let raw = numeric_stat(field, card);
                match op {
                    Op::Colon | Op::Eq => raw == Some(literal.as_str()),
                    Op::Ne => raw.is_some() && raw != Some(literal.as_str()),
                    _ => false,
                }
            })
        }
        _ => Box::new(|_| false),
    }
}

fn discrete_values(field: Field, card: &Card) -> Vec<String> {
    match field {
        Field::Layout => vec![card.layout.as_str().to_string()],
        Field::Set => card.set.iter().map(|s| s.to_lowercase()).collect(),
        Field::SetType => card.set_type.iter().map(|s| s.to_lowercase()).collect(),
        Field::CollectorNumber => card
            .collector_number
            .iter()
            .map(|s| s.to_lowercase())
            .collect(),
        Field::Language => vec![card.lang.to_lowercase()],
        Field::Games => card.games.iter().map(|g| g.as_str().to_string()).collect(),
        Field::Border => card.border_color.iter().map(|s| s.to_lowercase()).collect(),
        Field::Stamp => card
            .security_stamp
            .iter()
            .map(|s| s.to_lowercase())
            .collect(),
        _ => Vec::new(),
    }
}

fn discrete_predicate(clause: &FieldClause) -> CardPredicate {
    let field = clause.field;
    match (&clause.value, clause.op) {
        (Value::Regex(re), op) => {
            let re = re.clone();
            let negate = op == Op::Ne;
            Box::new(move |card| {
                negate != discrete_values(field, card).iter().any(|v| re.is_match(v))
            })
        }
        (Value::Text(text), op) => {
            let needle = text.to_lowercase();
            let negate = op == Op::Ne;
            Box::new(move |card| {
                negate != discrete_values(field, card).iter().any(|v| *v == needle)
            })
        }
        _ => Box::new(|_| false),
    }
}

fn rarity_predicate(clause: &FieldClause) -> CardPredicate {
    match &clause.value {
        Value::Regex(re) => {
            let re = re.clone();
            Box::new(move |card| re.is_match(card.rarity.as_str()))
        }
        Value::Text(text) => {
            let Some(want) = Rarity::from_name(text) else {
                return Box::new(|_| false);
            };
            let op = clause.op;
            Box::new(move |card| match op {
                Op::Colon | Op::Eq => card.rarity == want,
                Op::Ne => card.rarity != want,
                Op::Lt => card.rarity.order_rank() < want.order_rank(),
                Op::Le => card.rarity.order_rank() <= want.order_rank(),
                Op::Gt => card.rarity.order_rank() > want.order_rank(),
                Op::Ge => card.rarity.order_rank() >= want.order_rank(),
            })
        }
        _ => Box::new(|_| false),
    }
}

fn color_predicate(clause: &FieldClause) -> CardPredicate {
    let Value::ColorSet(want) = &clause.value else {
        return Box::new(|_| false);
    };
    let want = *want;
    let field = clause.field;
    let op = clause.op;
    Box::new(move |card| {
        let have = match field {
            Field::Colors => card.colors,
            _ => card.color_identity,
        };
        match op {
            // `c:` is superset, except the bare colorless value which asks
            // for exactly no colors.
            Op::Colon => {
                if want.is_empty() {
                    have.is_empty()
                } else {
                    have.is_superset(want)
                }
            }
            Op::Eq => have == want,
            Op::Ne => have != want,
            Op::Le => have.is_subset(want),
            Op::Ge => have.is_superset(want),
            Op::Lt => have.is_subset(want) && have != want,
            Op::Gt => have.is_superset(want) && have != want,
        }
    })
}

fn format_predicate(clause: &FieldClause) -> CardPredicate {
    let Value::Text(format) = &clause.value else {
        return Box::new(|_| false);
    };
    let format = format.clone();
    Box::new(move |card| card.legality(&format).is_playable())
}

fn date_predicate(clause: &FieldClause) -> CardPredicate {
    let Value::Date(want) = &clause.value else {
        return Box::new(|_| false);
    };
    let want = *want;
    let op = clause.op;
    Box::new(move |card| match card.released_at {
        Some(date) => match op {
            Op::Colon | Op::Eq => date == want,
            Op::Ne => date != want,
            Op::Lt => date < want,
            Op::Le => date <= want,
            Op::Gt => date > want,
            Op::Ge => date >= want,
        },
        None => false,
    })
}

fn is_predicate(clause: &FieldClause) -> CardPredicate {
    let Value::Text(name) = &clause.value else {
        return Box::new(|_| false);
    };
    let name = name.clone();
    Box::new(move |card| predicates::eval(&name, card))
}

/// Split a mana-cost string into symbols: `{2}{W}{W}` and bare `2WW` both
/// yield `["2", "W", "W"]`.
fn mana_symbols(cost: &str) -> Vec<String> {
    let mut symbols = Vec::new();
    let mut chars = cost.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                let mut symbol = String::new();
                for inner in chars.by_ref() {
                    if inner == '}' {
                        break;
                    }
                    symbol.push(inner.to_ascii_uppercase());
                }
                if !symbol.is_empty() {
                    symbols.push(symbol);
                }
            }
            '0'..='9' => {
                let mut number = ch.to_string();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_digit() {
                        number.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                symbols.push(number);
            }
            _ if ch.is_whitespace() => {}
            _ => symbols.push(ch.to_ascii_uppercase().to_string()),
        }
    }
    symbols
}

fn symbol_counts(symbols: &[String]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for symbol in symbols {
        *counts.entry(symbol.as_str()).or_insert(0) += 1;
    }
    counts
}

fn mana_predicate(clause: &FieldClause) -> CardPredicate {
    let Value::Text(text) = &clause.value else {
        return Box::new(|_| false);
    };
    let want = mana_symbols(text);
    let op = clause.op;
    Box::new(move |card| {
        let cost = card
            .mana_cost
            .as_deref()
            .or(card.front_face().and_then(|f| f.mana_cost.as_deref()));
        let Some(cost) = cost else { return false };
        let have = mana_symbols(cost);
        match op {
            // contains: every wanted symbol occurs at least as often
            Op::Colon => {
                let have = symbol_counts(&have);
                symbol_counts(&want)
                    .iter()
                    .all(|(sym, count)| have.get(sym).is_some_and(|c| c >= count))
            }
            Op::Eq => symbol_counts(&have) == symbol_counts(&want),
            Op::Ne => symbol_counts(&have) != symbol_counts(&want),
            _ => false,
        }
    })
}
