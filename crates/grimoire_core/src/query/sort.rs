use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::corpus::Card;

/// Field a result set is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    Name,
    #[serde(rename = "mv")]
    ManaValue,
    Released,
    Rarity,
    Color,
}

impl SortField {
    pub fn from_name(name: &str) -> Option<SortField> {
        match name.to_ascii_lowercase().as_str() {
            "name" => Some(SortField::Name),
            "mv" | "cmc" | "manavalue" => Some(SortField::ManaValue),
            "released" => Some(SortField::Released),
            "rarity" => Some(SortField::Rarity),
            "color" => Some(SortField::Color),
            _ => None,
        }
    }
}

/// Sort direction. `Auto` resolves per field: ascending for name, mana
/// value and color; descending for release date and rarity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Auto,
    Asc,
    Desc,
}

impl SortDir {
    pub fn from_name(name: &str) -> Option<SortDir> {
        match name.to_ascii_lowercase().as_str() {
            "auto" => Some(SortDir::Auto),
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub dir: SortDir,
}

impl SortSpec {
    pub fn new(field: SortField, dir: SortDir) -> SortSpec {
        SortSpec { field, dir }
    }

    fn descending(self) -> bool {
        match self.dir {
            SortDir::Asc => false,
            SortDir::Desc => true,
            SortDir::Auto => matches!(self.field, SortField::Released | SortField::Rarity),
        }
    }
}

fn primary(field: SortField, a: &Card, b: &Card) -> Ordering {
    match field {
        SortField::Name => name_order(a, b),
        SortField::ManaValue => a.cmc.total_cmp(&b.cmc),
        SortField::Released => a.released_at.cmp(&b.released_at),
        SortField::Rarity => a.rarity.order_rank().cmp(&b.rarity.order_rank()),
        SortField::Color => (a.color_identity.len(), a.color_identity.letters())
            .cmp(&(b.color_identity.len(), b.color_identity.letters())),
    }
}

fn name_order(a: &Card, b: &Card) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase())
}

/// Stable sort with name ascending as the final tiebreaker, regardless of
/// the chosen field and direction.
pub fn sort_cards(cards: &mut [&Card], spec: SortSpec) {
    let descending = spec.descending();
    cards.sort_by(|a, b| {
        let mut ordering = primary(spec.field, a, b);
        if descending {
            ordering = ordering.reverse();
        }
        ordering.then_with(|| name_order(a, b))
    });
}
