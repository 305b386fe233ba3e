//! Item level and star upgrades.
//!
//! Both are pure: they return the upgraded copy and leave persisting it (by id)
//! and paying for it to the caller. Each applies to the item's current power,
//! so level and star upgrades compose in whatever order the player triggers them.

use crate::core::constants::*;
use crate::items::types::Item;

/// Coin cost of the next level: `floor(50 * rarity_mult * 1.5^(level - 1))`.
/// At very high levels the last coin can differ from other `pow` implementations.
pub fn calculate_upgrade_cost(item: &Item) -> u64 {
    let rarity_multiplier = item.rarity.upgrade_multiplier() as f64;
    let level_multiplier = UPGRADE_COST_GROWTH.powi(item.level.saturating_sub(1) as i32);
    (UPGRADE_BASE_COST * rarity_multiplier * level_multiplier).floor() as u64
}

/// True while the item is below the level cap.
pub fn can_upgrade(item: &Item) -> bool {
    item.level < MAX_ITEM_LEVEL
}

/// Level +1, power `floor(power * 1.2)`.
pub fn upgrade_item(item: &Item) -> Item {
    Item {
        level: item.level + 1,
        power: (item.power as f64 * UPGRADE_POWER_MULTIPLIER).floor() as u64,
        ..item.clone()
    }
}

/// Gem cost of the next star, or None at max stars.
pub fn star_upgrade_cost(item: &Item) -> Option<u64> {
    (item.stars < MAX_STARS).then(|| item.stars as u64 * STAR_UPGRADE_GEM_COST)
}

/// Stars +1, power `floor(power * 1.5)`. None at max stars.
pub fn star_upgrade(item: &Item) -> Option<Item> {
    if item.stars >= MAX_STARS {
        return None;
    }
    Some(Item {
        stars: item.stars + 1,
        power: (item.power as f64 * STAR_POWER_MULTIPLIER).floor() as u64,
        ..item.clone()
    })
}
