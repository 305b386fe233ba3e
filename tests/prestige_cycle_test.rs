//! Integration test: Complete prestige cycle
//!
//! Tests the full flow: new game → earn exp and coins → prestige → verify reset

use idlegacha::core::game_state::{Currency, ResourceDelta};
use idlegacha::items::types::{Item, ItemFamily, Rarity};
use idlegacha::progression::leveling::total_xp_to_reach;
use idlegacha::progression::prestige::{can_prestige, prestige_cost};
use idlegacha::GameStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn item(id: &str, rarity: Rarity) -> Item {
    Item {
        id: id.to_string(),
        name: format!("{} item", rarity.name()),
        family: ItemFamily::Character,
        rarity,
        level: 5,
        stars: 2,
        power: 1_000,
        description: String::new(),
        icon: String::new(),
        obtained_at: 0,
    }
}

fn store_at_prestige_gate() -> GameStore {
    let mut store = GameStore::new(0);
    store.grant_exp(total_xp_to_reach(50));
    store.grant_resources(&ResourceDelta::coins(999_000));
    store
}

/// Test a complete prestige cycle from a fresh game to first prestige
#[test]
fn test_complete_prestige_cycle_first_prestige() {
    let mut store = GameStore::new(0);

    // Verify initial state
    assert_eq!(store.state().resources.level, 1);
    assert_eq!(store.state().stats.prestige_level, 0);
    assert!(!store.can_prestige());

    // Earn the level through exp
    let levels = store.grant_exp(total_xp_to_reach(50));
    assert_eq!(levels, 49);
    assert_eq!(store.state().resources.level, 50);
    assert!(!store.can_prestige(), "level alone is not enough");

    // Earn the coins
    store.grant_resources(&ResourceDelta::coins(999_000));
    assert_eq!(store.state().resources.coins, 1_000_000);
    assert!(store.can_prestige());
    assert_eq!(can_prestige(store.state()), store.can_prestige());

    // Collect a spread of items and some stats
    for (i, rarity) in Rarity::ALL.iter().enumerate() {
        store.add_to_inventory(item(&format!("item-{}", i), *rarity));
    }
    store.grant_resources(&ResourceDelta::gems(4_950));
    store.apply_idle_tick(3_000);
    let gems_before = store.state().resources.gems;
    let playtime_before = store.state().stats.playtime;

    assert!(store.prestige());

    let state = store.state();
    assert_eq!(state.resources.coins, 1000);
    assert_eq!(state.resources.level, 1);
    assert_eq!(state.resources.exp, 0);
    assert_eq!(state.resources.energy, 100);
    assert_eq!(state.resources.max_energy, 100);
    assert_eq!(state.resources.gems, gems_before, "gems survive prestige");
    assert_eq!(state.stats.prestige_level, 1);
    assert_eq!(state.stats.total_summons, 0);
    assert_eq!(state.stats.total_upgrades, 0);
    assert_eq!(state.stats.playtime, playtime_before);
    assert_eq!(state.stats.highest_rarity, Rarity::Immortal);

    let kept: Vec<Rarity> = state.inventory.iter().map(|i| i.rarity).collect();
    assert_eq!(kept, vec![Rarity::Mythic, Rarity::Immortal]);
}

#[test]
fn test_prestige_while_ineligible_is_silent_noop() {
    let mut store = GameStore::new(0);
    store.grant_resources(&ResourceDelta::coins(10_000_000));
    store.add_to_inventory(item("a", Rarity::Common));
    let before = store.state().clone();

    for _ in 0..3 {
        assert!(!store.prestige());
    }
    assert_eq!(store.state(), &before);
}

#[test]
fn test_second_prestige_needs_double_coins() {
    let mut store = store_at_prestige_gate();
    assert!(store.prestige());
    assert_eq!(store.prestige_cost(), prestige_cost(1));
    assert_eq!(prestige_cost(1), 2_000_000);

    store.grant_exp(total_xp_to_reach(50));
    store.grant_resources(&ResourceDelta::coins(1_000_000));
    assert!(!store.prestige(), "1,001,000 coins is short of 2,000,000");

    store.grant_resources(&ResourceDelta::coins(999_000));
    assert!(store.prestige());
    assert_eq!(store.state().stats.prestige_level, 2);
    assert_eq!(store.prestige_cost(), 4_000_000);
}

#[test]
fn test_prestige_boosts_idle_income() {
    let mut store = store_at_prestige_gate();
    let base = store.clone().apply_idle_tick(10_000);
    assert!(store.prestige());
    let boosted = store.apply_idle_tick(10_000);
    assert_eq!(base.coins, 10);
    assert_eq!(boosted.coins, 20);
    assert_eq!(boosted.gems, base.gems);
}

#[test]
fn test_play_after_prestige() {
    let mut store = store_at_prestige_gate();
    store.add_to_inventory(item("keeper", Rarity::Mythic));
    assert!(store.prestige());

    // Retained items can still be upgraded, and counters restart from zero.
    store.grant_resources(&ResourceDelta::coins(10_000));
    let upgraded = store.upgrade_item("keeper").unwrap();
    assert_eq!(upgraded.level, 6);
    assert_eq!(store.state().stats.total_upgrades, 1);
    // 50 * 32 * 1.5^4
    assert_eq!(store.state().resources.coins, 11_000 - 8_100);

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    store.summon("basic", 29, &mut rng, 0).unwrap();
    assert_eq!(store.state().stats.total_summons, 29);
    assert_eq!(store.state().resources.coins, 0);
    assert!(!store.spend_resources(1, Currency::Coins));
}
