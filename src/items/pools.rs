//! Gacha pool configuration.

use super::catalog::{item_templates, templates_below};
use super::types::{ItemTemplate, Rarity};
use crate::core::constants::RATE_EPSILON;
use crate::core::game_state::Currency;
use serde::{Deserialize, Serialize};

/// Per-rarity drop probabilities, stored in canonical rarity order.
///
/// Rarities without an entry have rate 0. Whatever the table does not cover
/// (`1 - total()`) is the no-drop chance.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RateTable {
    rates: [f64; Rarity::COUNT],
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(rarity, rate)` pairs. Later pairs overwrite earlier ones.
    pub fn from_pairs(pairs: &[(Rarity, f64)]) -> Self {
        let mut table = Self::new();
        for &(rarity, rate) in pairs {
            table.set(rarity, rate);
        }
        table
    }

    pub fn get(&self, rarity: Rarity) -> f64 {
        self.rates[rarity.rank()]
    }

    pub fn set(&mut self, rarity: Rarity, rate: f64) {
        self.rates[rarity.rank()] = rate;
    }

    pub fn total(&self) -> f64 {
        self.rates.iter().sum()
    }

    /// Iterates `(rarity, rate)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Rarity, f64)> + '_ {
        Rarity::ALL.iter().map(move |&r| (r, self.get(r)))
    }

    /// A table is well-formed when every rate is in `[0, 1]` and the total is at most 1.
    pub fn is_well_formed(&self) -> bool {
        self.rates.iter().all(|r| (0.0..=1.0).contains(r)) && self.total() <= 1.0 + RATE_EPSILON
    }

    /// Chance that a single roll against this table yields nothing.
    pub fn no_drop_chance(&self) -> f64 {
        (1.0 - self.total()).max(0.0)
    }
}

/// A named draw configuration: cost, currency, rates and eligible templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GachaPool {
    pub id: String,
    pub name: String,
    pub cost: u64,
    pub currency: Currency,
    pub rates: RateTable,
    pub available_items: Vec<ItemTemplate>,
}

impl GachaPool {
    /// Total price of `count` draws, or None on overflow.
    pub fn cost_for(&self, count: u32) -> Option<u64> {
        self.cost.checked_mul(count as u64)
    }

    /// Templates in this pool of exactly `rarity`.
    pub fn templates_of(&self, rarity: Rarity) -> impl Iterator<Item = &ItemTemplate> {
        self.available_items.iter().filter(move |t| t.rarity == rarity)
    }

    /// Lists configuration problems: bad rates, or positive-rate rarities with no
    /// template (those draws fall back to common).
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.rates.is_well_formed() {
            problems.push(format!(
                "pool '{}' rates are malformed (total {:.4})",
                self.id,
                self.rates.total()
            ));
        }
        for (rarity, rate) in self.rates.iter() {
            if rate > 0.0 && self.templates_of(rarity).next().is_none() {
                problems.push(format!(
                    "pool '{}' has rate {} for {} but no templates",
                    self.id,
                    rate,
                    rarity.name()
                ));
            }
        }
        if self.templates_of(Rarity::Common).next().is_none() {
            problems.push(format!("pool '{}' has no common fallback templates", self.id));
        }
        problems
    }
}

/// Returns the built-in pools.
pub fn get_all_pools() -> Vec<GachaPool> {
    vec![
        GachaPool {
            id: "basic".to_string(),
            name: "Basic Summon".to_string(),
            cost: 100,
            currency: Currency::Coins,
            rates: RateTable::from_pairs(&[
                (Rarity::Common, 0.55),
                (Rarity::Uncommon, 0.25),
                (Rarity::Rare, 0.10),
                (Rarity::SuperRare, 0.05),
                (Rarity::Epic, 0.03),
                (Rarity::Legendary, 0.01),
                (Rarity::Mythic, 0.005),
                (Rarity::Immortal, 0.0),
            ]),
            // Mythic rolls here fall back to common.
            available_items: templates_below(Rarity::Mythic),
        },
        GachaPool {
            id: "premium".to_string(),
            name: "Premium Summon".to_string(),
            cost: 10,
            currency: Currency::Gems,
            rates: RateTable::from_pairs(&[
                (Rarity::Common, 0.27),
                (Rarity::Uncommon, 0.24),
                (Rarity::Rare, 0.20),
                (Rarity::SuperRare, 0.12),
                (Rarity::Epic, 0.08),
                (Rarity::Legendary, 0.05),
                (Rarity::Mythic, 0.02),
                (Rarity::Immortal, 0.01),
            ]),
            available_items: item_templates(),
        },
    ]
}

pub fn get_pool(pool_id: &str) -> Option<GachaPool> {
    get_all_pools().into_iter().find(|p| p.id == pool_id)
}
