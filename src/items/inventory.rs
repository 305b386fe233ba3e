//! Read-only inventory queries for whatever front end lists items.

use super::types::{Item, ItemFamily, Rarity};
use crate::core::constants::MAX_ITEM_LEVEL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Highest power first.
    #[default]
    Power,
    /// Highest rarity rank first.
    Rarity,
    /// Most recently obtained first.
    Recent,
}

impl SortBy {
    pub fn parse(s: &str) -> Option<SortBy> {
        match s {
            "power" => Some(SortBy::Power),
            "rarity" => Some(SortBy::Rarity),
            "recent" => Some(SortBy::Recent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryFilter {
    pub family: Option<ItemFamily>,
    pub rarity: Option<Rarity>,
}

impl InventoryFilter {
    /// Builds a filter from words such as `epic` or `weapon`.
    /// Errors with the first word that is neither a rarity nor a family.
    pub fn from_terms<S: AsRef<str>>(terms: &[S]) -> Result<Self, String> {
        let mut filter = Self::default();
        for term in terms {
            let term = term.as_ref();
            if let Some(rarity) = Rarity::parse(term) {
                filter.rarity = Some(rarity);
            } else if let Some(family) = ItemFamily::parse(term) {
                filter.family = Some(family);
            } else {
                return Err(term.to_string());
            }
        }
        Ok(filter)
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.family.map_or(true, |f| item.family == f)
            && self.rarity.map_or(true, |r| item.rarity == r)
    }
}

/// Filters then sorts. Sorting is stable, so ties keep inventory order.
pub fn query_inventory<'a>(
    items: &'a [Item],
    filter: InventoryFilter,
    sort: SortBy,
) -> Vec<&'a Item> {
    let mut result: Vec<&Item> = items.iter().filter(|i| filter.matches(i)).collect();
    match sort {
        SortBy::Power => result.sort_by(|a, b| b.power.cmp(&a.power)),
        SortBy::Rarity => result.sort_by(|a, b| b.rarity.rank().cmp(&a.rarity.rank())),
        SortBy::Recent => result.sort_by(|a, b| b.obtained_at.cmp(&a.obtained_at)),
    }
    result
}

/// Items below the level cap, strongest first.
pub fn upgradeable_items(items: &[Item]) -> Vec<&Item> {
    let mut result: Vec<&Item> = items.iter().filter(|i| i.level < MAX_ITEM_LEVEL).collect();
    result.sort_by(|a, b| b.power.cmp(&a.power));
    result
}

pub fn find_item<'a>(items: &'a [Item], id: &str) -> Option<&'a Item> {
    items.iter().find(|i| i.id == id)
}

/// Total power across the inventory.
pub fn total_power(items: &[Item]) -> u64 {
    items.iter().map(|i| i.power).fold(0u64, u64::saturating_add)
}
