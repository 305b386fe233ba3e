//! Summon engine: turns pool draws into owned item instances.
//!
//! Draws are independent. There is no pity counter and no guaranteed rare in a
//! multi-summon; every draw sees the same table.

use super::drops::{pick_template, roll_rarity};
use super::pools::GachaPool;
use super::types::{Item, ItemTemplate};
use crate::core::constants::POWER_VARIANCE;
use rand::Rng;
use uuid::Builder;

/// One draw against `pool`. None on a no-drop.
///
/// Spending is the caller's job and happens before this is called.
pub fn perform_summon(pool: &GachaPool, rng: &mut impl Rng, now_ms: i64) -> Option<Item> {
    let rarity = roll_rarity(&pool.rates, rng)?;
    let template = pick_template(&pool.available_items, rarity, rng)?;
    let item = create_item_from_template(template, rng, now_ms);
    tracing::debug!(
        pool = %pool.id,
        item = %item.name,
        rarity = item.rarity.name(),
        power = item.power,
        "summoned"
    );
    Some(item)
}

/// `count` independent draws.
pub fn perform_multi_summon(
    pool: &GachaPool,
    count: u32,
    rng: &mut impl Rng,
    now_ms: i64,
) -> Vec<Option<Item>> {
    (0..count).map(|_| perform_summon(pool, rng, now_ms)).collect()
}

/// Power after the ±5% jitter: `floor(base * (1 + (u - 0.5) * 0.10))`.
pub fn jittered_power(base_power: u64, unit_roll: f64) -> u64 {
    let multiplier = 1.0 + (unit_roll - 0.5) * POWER_VARIANCE;
    (base_power as f64 * multiplier).floor() as u64
}

/// Instantiates a fresh level 1, one-star item.
pub fn create_item_from_template(template: &ItemTemplate, rng: &mut impl Rng, now_ms: i64) -> Item {
    let power = jittered_power(template.base_power, rng.gen::<f64>());
    Item {
        id: generate_item_id(rng),
        name: template.name.clone(),
        family: template.family,
        rarity: template.rarity,
        level: 1,
        stars: 1,
        power,
        description: template.description.clone(),
        icon: template.icon.clone(),
        obtained_at: now_ms,
    }
}

/// UUID v4 drawn from `rng`, so seeded runs produce the same ids.
pub fn generate_item_id(rng: &mut impl Rng) -> String {
    Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}
