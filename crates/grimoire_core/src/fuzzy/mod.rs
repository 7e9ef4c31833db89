//! Fuzzy name lookup over canonical printings: exact, prefix, and
//! bounded-edit-distance matches, in that order of preference. This is the
//! fallback path for queries that carry no field clauses.

use uuid::Uuid;

use crate::corpus::Corpus;

/// How a candidate name matched the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchKind {
    Exact,
    Prefix,
    Fuzzy(usize),
}

#[derive(Debug, Clone)]
struct NameEntry {
    lower: String,
    id: Uuid,
}

/// Name index built once at startup.
#[derive(Debug, Default)]
pub struct NameIndex {
    entries: Vec<NameEntry>,
}

impl NameIndex {
    /// Index the canonical printing of every oracle group.
    pub fn build(corpus: &Corpus) -> NameIndex {
        let mut entries: Vec<NameEntry> = corpus
            .canonical_cards()
            .map(|card| NameEntry {
                lower: card.name.to_lowercase(),
                id: card.id,
            })
            .collect();
        entries.sort_by(|a, b| a.lower.cmp(&b.lower));
        tracing::debug!(names = entries.len(), "fuzzy name index built");
        NameIndex { entries }
    }

    /// Printing ids whose names match `input`, best first. Empty and
    /// whitespace-only input matches nothing.
    pub fn search(&self, input: &str, limit: usize) -> Vec<Uuid> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let max_distance = distance_budget(&needle);

        let mut matches: Vec<(MatchKind, &NameEntry)> = Vec::new();
        for entry in &self.entries {
            let kind = if entry.lower == needle {
                MatchKind::Exact
            } else if entry.lower.starts_with(&needle) {
                MatchKind::Prefix
            } else {
                match bounded_edit_distance(&entry.lower, &needle, max_distance) {
                    Some(distance) => MatchKind::Fuzzy(distance),
                    None => continue,
                }
            };
            matches.push((kind, entry));
        }

        matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.lower.cmp(&b.1.lower)));
        matches
            .into_iter()
            .take(limit)
            .map(|(_, entry)| entry.id)
            .collect()
    }
}

/// Edit budget scaled to the input length, capped so short inputs stay
/// precise and long inputs do not match everything.
fn distance_budget(needle: &str) -> usize {
    (needle.chars().count() / 4).clamp(1, 3)
}

/// Levenshtein distance, abandoning early once every cell of a row exceeds
/// `max`. Returns `None` when the distance is over budget.
fn bounded_edit_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len().abs_diff(b.len()) > max {
        return None;
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        let mut row_min = current[0];
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
            row_min = row_min.min(current[j + 1]);
        }
        if row_min > max {
            return None;
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let distance = previous[b.len()];
    (distance <= max).then_some(distance)
}
