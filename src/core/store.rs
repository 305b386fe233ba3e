//! The game state store: the single owner of [`GameState`].
//!
//! Everything that changes resources, inventory or stats goes through a method
//! here. Player actions follow spend-then-act: the cost is debited atomically
//! first and nothing else happens if that fails.

use super::game_state::{Currency, GameState, ResourceDelta, SettingsUpdate, StatsUpdate};
use super::idle::{calculate_energy_regeneration, generate_idle_resources, idle_gains, IdleGains};
use super::offline::{process_offline_progression, OfflineReport};
use crate::core::constants::*;
use crate::error::{Result, StoreError};
use crate::items::pools::{get_all_pools, GachaPool};
use crate::items::summon::perform_multi_summon;
use crate::items::types::Item;
use crate::progression::leveling::apply_exp;
use crate::progression::prestige;
use crate::progression::upgrade::{
    calculate_upgrade_cost, can_upgrade, star_upgrade, star_upgrade_cost, upgrade_item,
};
use parking_lot::Mutex;
use rand::Rng;
use std::sync::Arc;

/// Store handle shared between the front end and the ticker thread.
pub type SharedStore = Arc<Mutex<GameStore>>;

/// Result of a paid summon.
#[derive(Debug, Clone, PartialEq)]
pub struct SummonOutcome {
    /// One entry per draw; None is a no-drop.
    pub items: Vec<Option<Item>>,
    pub cost: u64,
    pub currency: Currency,
}

impl SummonOutcome {
    pub fn obtained(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().flatten()
    }

    pub fn no_drops(&self) -> usize {
        self.items.iter().filter(|i| i.is_none()).count()
    }
}

#[derive(Debug, Clone)]
pub struct GameStore {
    state: GameState,
    pools: Vec<GachaPool>,
}

impl GameStore {
    /// Fresh game with the built-in pools.
    pub fn new(now_ms: i64) -> Self {
        Self::from_state(GameState::new(now_ms))
    }

    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            pools: get_all_pools(),
        }
    }

    /// Replaces the built-in pools.
    pub fn with_pools(mut self, pools: Vec<GachaPool>) -> Self {
        self.pools = pools;
        self
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Read-only snapshot of the current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pools(&self) -> &[GachaPool] {
        &self.pools
    }

    pub fn pool(&self, pool_id: &str) -> Option<&GachaPool> {
        self.pools.iter().find(|p| p.id == pool_id)
    }

    // ── Primitive mutations ───────────────────────────────────────────

    /// Debits `amount` iff the balance covers it. No-op on false.
    pub fn spend_resources(&mut self, amount: u64, currency: Currency) -> bool {
        let spent = self.state.resources.try_spend(amount, currency);
        if !spent {
            tracing::debug!(amount, currency = currency.name(), "spend refused");
        }
        spent
    }

    pub fn grant_resources(&mut self, delta: &ResourceDelta) {
        self.state.resources.apply(delta);
    }

    /// Adds exp and applies any level-ups. Returns the number of levels gained.
    pub fn grant_exp(&mut self, amount: u64) -> u32 {
        let levelups = apply_exp(&mut self.state.resources, amount);
        if levelups > 0 {
            tracing::debug!(level = self.state.resources.level, "level up");
        }
        levelups
    }

    /// Appends an item and raises `highest_rarity` if it beats the record.
    pub fn add_to_inventory(&mut self, item: Item) {
        self.state.stats.merge(&StatsUpdate {
            highest_rarity: Some(item.rarity),
            ..StatsUpdate::default()
        });
        self.state.inventory.push(item);
    }

    pub fn update_stats(&mut self, update: &StatsUpdate) {
        self.state.stats.merge(update);
    }

    pub fn update_settings(&mut self, update: &SettingsUpdate) {
        self.state.settings.merge(update);
    }

    // ── Player actions ────────────────────────────────────────────────

    /// Pays for and performs `count` draws from `pool_id`.
    ///
    /// None when the pool is unknown, `count` is zero or the player cannot pay;
    /// state is untouched in all three cases. Once paid, the outcome stands even
    /// if every draw is a no-drop.
    pub fn summon(
        &mut self,
        pool_id: &str,
        count: u32,
        rng: &mut impl Rng,
        now_ms: i64,
    ) -> Option<SummonOutcome> {
        if count == 0 {
            return None;
        }
        let pool = self.pool(pool_id)?.clone();
        let cost = pool.cost_for(count)?;
        if !self.spend_resources(cost, pool.currency) {
            return None;
        }

        let items = perform_multi_summon(&pool, count, rng, now_ms);
        let mut obtained = 0u64;
        for item in items.iter().flatten() {
            self.add_to_inventory(item.clone());
            obtained += 1;
        }
        self.state.stats.total_summons += count as u64;
        self.grant_exp(obtained * EXP_PER_SUMMONED_ITEM);

        tracing::debug!(pool = pool_id, count, cost, obtained, "summon complete");
        Some(SummonOutcome {
            items,
            cost,
            currency: pool.currency,
        })
    }

    /// Levels up the item with `item_id`, paying coins. Returns the new item.
    pub fn upgrade_item(&mut self, item_id: &str) -> Option<Item> {
        let index = self.item_index(item_id)?;
        let current = &self.state.inventory[index];
        if !can_upgrade(current) {
            return None;
        }
        let cost = calculate_upgrade_cost(current);
        let upgraded = upgrade_item(current);
        if !self.spend_resources(cost, Currency::Coins) {
            return None;
        }

        self.state.inventory[index] = upgraded.clone();
        self.state.stats.total_upgrades += 1;
        self.grant_exp(EXP_PER_UPGRADE);
        tracing::debug!(
            item = %upgraded.name,
            level = upgraded.level,
            power = upgraded.power,
            cost,
            "upgraded"
        );
        Some(upgraded)
    }

    /// Adds a star to the item with `item_id`, paying gems. Max-star items are
    /// refused before anything is spent.
    pub fn star_upgrade_item(&mut self, item_id: &str) -> Option<Item> {
        let index = self.item_index(item_id)?;
        let current = &self.state.inventory[index];
        let cost = star_upgrade_cost(current)?;
        let upgraded = star_upgrade(current)?;
        if !self.spend_resources(cost, Currency::Gems) {
            return None;
        }

        self.state.inventory[index] = upgraded.clone();
        tracing::debug!(
            item = %upgraded.name,
            stars = upgraded.stars,
            power = upgraded.power,
            cost,
            "star upgraded"
        );
        Some(upgraded)
    }

    pub fn can_prestige(&self) -> bool {
        prestige::can_prestige(&self.state)
    }

    pub fn prestige_cost(&self) -> u64 {
        prestige::prestige_cost(self.state.stats.prestige_level)
    }

    /// Prestige transition. Refuses silently (false) when not allowed.
    pub fn prestige(&mut self) -> bool {
        let cost = self.prestige_cost();
        if !prestige::perform_prestige(&mut self.state) {
            return false;
        }
        tracing::info!(
            prestige_level = self.state.stats.prestige_level,
            cost,
            kept_items = self.state.inventory.len(),
            "prestiged"
        );
        true
    }

    /// Energy for `elapsed_ms`, capped at max energy. Returns the amount added.
    pub fn regenerate_energy(&mut self, elapsed_ms: i64) -> u32 {
        let r = &self.state.resources;
        let regen = calculate_energy_regeneration(elapsed_ms, r.max_energy);
        let before = r.energy;
        self.grant_resources(&ResourceDelta {
            energy: regen,
            ..ResourceDelta::default()
        });
        self.state.resources.energy.saturating_sub(before)
    }

    /// One live tick: idle coins and gems for `elapsed_ms` plus playtime.
    /// Moves `last_save` forward by the same amount.
    pub fn apply_idle_tick(&mut self, elapsed_ms: i64) -> IdleGains {
        let prestige_level = self.state.stats.prestige_level;
        let gains = idle_gains(elapsed_ms, prestige_level);
        self.state.resources =
            generate_idle_resources(elapsed_ms, &self.state.resources, prestige_level);
        self.state.stats.playtime += (elapsed_ms.max(0) / 1000) as u64;
        // Ticked time is credited; catch-up starts after it.
        self.state.last_save = self.state.last_save.saturating_add(elapsed_ms.max(0));
        gains
    }

    /// Offline catch-up against the persisted `last_save`, then `last_save = now`.
    pub fn catch_up(&mut self, now_ms: i64) -> OfflineReport {
        process_offline_progression(&mut self.state, now_ms)
    }

    /// Wipes everything back to a fresh game.
    pub fn reset(&mut self, now_ms: i64) {
        tracing::info!("game reset");
        self.state = GameState::new(now_ms);
    }

    // ── Serialization ─────────────────────────────────────────────────

    /// Stamps `last_save = now` and returns the state to persist.
    pub fn snapshot_for_save(&mut self, now_ms: i64) -> GameState {
        self.state.last_save = now_ms;
        self.state.clone()
    }

    /// The bare state document, pretty-printed.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.state)?)
    }

    /// Replaces the state with an imported document.
    ///
    /// On any error the current state is left as it was. The imported state is
    /// stamped `last_save = now` so no offline time is credited for it.
    pub fn import_json(&mut self, json: &str, now_ms: i64) -> Result<()> {
        let mut imported: GameState = serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "rejected import: unparseable");
            StoreError::from(e)
        })?;
        imported.validate().map_err(|msg| {
            tracing::warn!(reason = %msg, "rejected import: invalid state");
            StoreError::Invalid(msg)
        })?;
        imported.last_save = now_ms;
        tracing::info!(items = imported.inventory.len(), "imported game state");
        self.state = imported;
        Ok(())
    }

    fn item_index(&self, item_id: &str) -> Option<usize> {
        self.state.inventory.iter().position(|i| i.id == item_id)
    }
}
