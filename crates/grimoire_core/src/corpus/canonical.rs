use std::cmp::Ordering;

use super::types::{Card, Layout};

/// Score tuple for canonical selection. Compared lexicographically with
/// larger values winning: English first, then image availability, then
/// non-promo, non-digital, black border, modern frame, non-fullart,
/// non-variation, and finally the most recent release year.
fn score(card: &Card) -> (bool, bool, bool, bool, bool, bool, bool, bool, i32) {
    (
        card.is_english(),
        card.has_image(),
        !card.promo,
        !card.digital,
        card.border_color.as_deref() == Some("black"),
        card.frame.is_some_and(|year| year >= 2015),
        !card.full_art,
        !card.variation,
        card.release_year().unwrap_or(i32::MIN),
    )
}

/// Deterministic total order over printings of one oracle group; the
/// canonical printing sorts first. Printing id breaks remaining ties so the
/// order never depends on input ordering.
pub fn canonical_order(a: &Card, b: &Card) -> Ordering {
    score(b).cmp(&score(a)).then_with(|| a.id.cmp(&b.id))
}

/// Pick the canonical printing out of an oracle group. Art-series printings
/// are never canonical.
pub fn pick_canonical<'a, I>(printings: I) -> Option<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    printings
        .into_iter()
        .filter(|card| card.layout != Layout::ArtSeries)
        .min_by(|a, b| canonical_order(a, b))
}
