//! Main simulation runner.
//!
//! Draws against a pool with the same resolver the store uses and tallies
//! what was rolled and what was actually obtained.

use super::config::SimConfig;
use super::report::{DrawTally, SimReport};
use crate::items::drops::{pick_template, roll_rarity};
use crate::items::pools::{get_pool, GachaPool};
use crate::items::summon::jittered_power;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report. None if the pool is unknown.
pub fn run_simulation(config: &SimConfig) -> Option<SimReport> {
    let pool = get_pool(&config.pool_id)?;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    Some(simulate_pool(&pool, config, &mut rng))
}

/// Draws `config.num_draws` times from `pool`.
pub fn simulate_pool(pool: &GachaPool, config: &SimConfig, rng: &mut impl Rng) -> SimReport {
    let mut tally = DrawTally::default();
    let progress_every = (config.num_draws / 10).max(1);

    for draw in 0..config.num_draws {
        simulate_draw(pool, &mut tally, rng);

        if config.verbosity >= 2 && (draw + 1) % progress_every == 0 {
            println!(
                "Draw {}/{} - {} no-drops, {} fallbacks",
                draw + 1,
                config.num_draws,
                tally.no_drops,
                tally.fallbacks
            );
        }
    }

    SimReport::from_tally(pool, tally)
}

fn simulate_draw(pool: &GachaPool, tally: &mut DrawTally, rng: &mut impl Rng) {
    tally.draws += 1;
    let Some(rarity) = roll_rarity(&pool.rates, rng) else {
        tally.no_drops += 1;
        return;
    };
    tally.rolled[rarity.rank()] += 1;

    match pick_template(&pool.available_items, rarity, rng) {
        Some(template) => {
            if template.rarity != rarity {
                tally.fallbacks += 1;
            }
            tally.obtained[template.rarity.rank()] += 1;
            tally.total_power += jittered_power(template.base_power, rng.gen::<f64>());
        }
        None => tally.unfilled += 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::types::Rarity;

    fn seeded(pool_id: &str, draws: u64) -> SimConfig {
        SimConfig {
            pool_id: pool_id.to_string(),
            num_draws: draws,
            seed: Some(42),
            verbosity: 0,
        }
    }

    #[test]
    fn test_unknown_pool() {
        assert!(run_simulation(&seeded("nope", 10)).is_none());
    }

    #[test]
    fn test_counts_add_up() {
        let report = run_simulation(&seeded("basic", 20_000)).unwrap();
        let rolled: u64 = report.rarities.iter().map(|r| r.rolled).sum();
        let obtained: u64 = report.rarities.iter().map(|r| r.obtained).sum();
        assert_eq!(report.draws, 20_000);
        assert_eq!(rolled + report.no_drops, 20_000);
        assert_eq!(obtained + report.unfilled, rolled);
        assert_eq!(report.currency_spent, 2_000_000);
    }

    #[test]
    fn test_basic_pool_mythic_falls_back() {
        let report = run_simulation(&seeded("basic", 50_000)).unwrap();
        let mythic = &report.rarities[Rarity::Mythic.rank()];
        assert!(mythic.rolled > 0);
        assert_eq!(mythic.obtained, 0);
        assert_eq!(report.fallbacks, mythic.rolled);
        assert_eq!(report.rarities[Rarity::Immortal.rank()].rolled, 0);
    }

    #[test]
    fn test_premium_rates_converge() {
        let report = run_simulation(&seeded("premium", 100_000)).unwrap();
        assert!(
            report.max_deviation < 0.01,
            "max deviation {} too large",
            report.max_deviation
        );
        assert_eq!(report.fallbacks, 0);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = run_simulation(&seeded("premium", 5_000)).unwrap();
        let b = run_simulation(&seeded("premium", 5_000)).unwrap();
        assert_eq!(a.to_json(), b.to_json());
    }
}
