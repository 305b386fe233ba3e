//! Probability resolution: rarity roll, then template pick within the rarity.

use super::pools::RateTable;
use super::types::{ItemTemplate, Rarity};
use crate::core::constants::RATE_EPSILON;
use rand::Rng;

/// Rolls a rarity against `rates`, or None for a no-drop.
///
/// Rates are accumulated in canonical rarity order, independent of how the
/// table was built. Rarities with a non-positive rate are never returned.
pub fn roll_rarity(rates: &RateTable, rng: &mut impl Rng) -> Option<Rarity> {
    let roll = rng.gen::<f64>();
    rarity_for_roll(rates, roll)
}

/// Deterministic half of [`roll_rarity`]: maps a roll in `[0, 1)` to a rarity.
pub fn rarity_for_roll(rates: &RateTable, roll: f64) -> Option<Rarity> {
    let mut cumulative = 0.0;
    let mut last_positive = None;

    for (rarity, rate) in rates.iter() {
        if rate <= 0.0 {
            continue;
        }
        cumulative += rate;
        last_positive = Some(rarity);
        if cumulative >= roll {
            return Some(rarity);
        }
    }

    // A table that sums to 1 must never produce a no-drop, even when the
    // float sum lands a hair under 1.
    if (1.0 - cumulative).abs() <= RATE_EPSILON {
        return last_positive;
    }
    None
}

/// Picks a template of `rarity` uniformly from `templates`.
///
/// When no template has that rarity, picks uniformly among the common
/// templates instead. None only if there are no common templates either.
pub fn pick_template<'a>(
    templates: &'a [ItemTemplate],
    rarity: Rarity,
    rng: &mut impl Rng,
) -> Option<&'a ItemTemplate> {
    let matching: Vec<&ItemTemplate> = templates.iter().filter(|t| t.rarity == rarity).collect();
    if !matching.is_empty() {
        return Some(matching[rng.gen_range(0..matching.len())]);
    }

    tracing::warn!(
        rarity = rarity.name(),
        "no templates for rolled rarity, falling back to common"
    );
    let commons: Vec<&ItemTemplate> = templates
        .iter()
        .filter(|t| t.rarity == Rarity::Common)
        .collect();
    if commons.is_empty() {
        return None;
    }
    Some(commons[rng.gen_range(0..commons.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog::item_templates;
    use crate::items::pools::get_pool;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rarity_for_roll_boundaries() {
        let rates = RateTable::from_pairs(&[(Rarity::Common, 0.5), (Rarity::Rare, 0.3)]);
        assert_eq!(rarity_for_roll(&rates, 0.0), Some(Rarity::Common));
        assert_eq!(rarity_for_roll(&rates, 0.5), Some(Rarity::Common));
        assert_eq!(rarity_for_roll(&rates, 0.50001), Some(Rarity::Rare));
        assert_eq!(rarity_for_roll(&rates, 0.8), Some(Rarity::Rare));
        assert_eq!(rarity_for_roll(&rates, 0.81), None);
        assert_eq!(rarity_for_roll(&rates, 0.999), None);
    }

    #[test]
    fn test_zero_rate_rarities_are_skipped() {
        let rates = RateTable::from_pairs(&[(Rarity::Common, 0.0), (Rarity::Epic, 1.0)]);
        // A roll of exactly 0 must not land on the zero-rate common tier.
        assert_eq!(rarity_for_roll(&rates, 0.0), Some(Rarity::Epic));
    }

    #[test]
    fn test_full_table_never_no_drop() {
        // 0.1 * 10 in floating point sums to slightly below 1.0.
        let mut rates = RateTable::new();
        rates.set(Rarity::Common, 0.1);
        rates.set(Rarity::Uncommon, 0.1);
        rates.set(Rarity::Rare, 0.1);
        rates.set(Rarity::SuperRare, 0.1);
        rates.set(Rarity::Epic, 0.1);
        rates.set(Rarity::Legendary, 0.1);
        rates.set(Rarity::Mythic, 0.1);
        rates.set(Rarity::Immortal, 0.3);
        assert_eq!(rarity_for_roll(&rates, 0.999_999_999_999), Some(Rarity::Immortal));
    }

    #[test]
    fn test_empty_table_always_no_drop() {
        let rates = RateTable::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..1000 {
            assert_eq!(roll_rarity(&rates, &mut rng), None);
        }
    }

    #[test]
    fn test_roll_rarity_distribution() {
        let pool = get_pool("premium").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let trials = 100_000;
        let mut counts = [0u32; Rarity::COUNT];
        let mut misses = 0;

        for _ in 0..trials {
            match roll_rarity(&pool.rates, &mut rng) {
                Some(r) => counts[r.rank()] += 1,
                None => misses += 1,
            }
        }

        for (rarity, rate) in pool.rates.iter() {
            let observed = counts[rarity.rank()] as f64 / trials as f64;
            assert!(
                (observed - rate).abs() < 0.01,
                "{:?}: expected ~{}, got {}",
                rarity,
                rate,
                observed
            );
        }
        let miss_rate = misses as f64 / trials as f64;
        assert!((miss_rate - 0.01).abs() < 0.005, "no-drop rate {}", miss_rate);
    }

    #[test]
    fn test_pick_template_matches_rarity() {
        let templates = item_templates();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for rarity in Rarity::ALL {
            let picked = pick_template(&templates, rarity, &mut rng).unwrap();
            assert_eq!(picked.rarity, rarity);
        }
    }

    #[test]
    fn test_pick_template_reaches_every_candidate() {
        let templates = item_templates();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(pick_template(&templates, Rarity::Common, &mut rng).unwrap().name.clone());
        }
        // Wooden Sword, Basic Staff, Cloth Robe
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_pick_template_falls_back_to_common() {
        let basic = get_pool("basic").unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..100 {
            let picked = pick_template(&basic.available_items, Rarity::Mythic, &mut rng).unwrap();
            assert_eq!(picked.rarity, Rarity::Common);
        }
    }

    #[test]
    fn test_pick_template_without_commons() {
        let templates: Vec<ItemTemplate> = item_templates()
            .into_iter()
            .filter(|t| t.rarity == Rarity::Epic)
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(pick_template(&templates, Rarity::Rare, &mut rng).is_none());
    }
}
