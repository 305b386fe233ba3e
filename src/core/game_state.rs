use super::constants::*;
use crate::items::types::{Item, Rarity};
use serde::{Deserialize, Serialize};

/// A spendable resource field, named the way saves and pool configs name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Currency {
    Coins,
    Gems,
    Energy,
    MaxEnergy,
    Exp,
    Level,
}

impl Currency {
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Coins => "coins",
            Currency::Gems => "gems",
            Currency::Energy => "energy",
            Currency::MaxEnergy => "maxEnergy",
            Currency::Exp => "exp",
            Currency::Level => "level",
        }
    }

    /// Lowest balance a spend may leave behind.
    fn floor(&self) -> u64 {
        match self {
            Currency::Level => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    pub coins: u64,
    pub gems: u64,
    pub energy: u32,
    pub max_energy: u32,
    pub exp: u64,
    pub level: u32,
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

impl Resources {
    pub fn new() -> Self {
        Self {
            coins: INITIAL_COINS,
            gems: INITIAL_GEMS,
            energy: INITIAL_ENERGY,
            max_energy: INITIAL_MAX_ENERGY,
            exp: 0,
            level: 1,
        }
    }

    pub fn get(&self, currency: Currency) -> u64 {
        match currency {
            Currency::Coins => self.coins,
            Currency::Gems => self.gems,
            Currency::Energy => self.energy as u64,
            Currency::MaxEnergy => self.max_energy as u64,
            Currency::Exp => self.exp,
            Currency::Level => self.level as u64,
        }
    }

    pub fn can_afford(&self, amount: u64, currency: Currency) -> bool {
        self.get(currency)
            .checked_sub(amount)
            .is_some_and(|left| left >= currency.floor())
    }

    /// Debits `amount` if affordable. Leaves `self` untouched and returns false otherwise.
    pub fn try_spend(&mut self, amount: u64, currency: Currency) -> bool {
        if !self.can_afford(amount, currency) {
            return false;
        }
        let left = self.get(currency) - amount;
        match currency {
            Currency::Coins => self.coins = left,
            Currency::Gems => self.gems = left,
            // Narrowing is lossless: `left` is below the original u32 value.
            Currency::Energy => self.energy = left as u32,
            Currency::MaxEnergy => {
                self.max_energy = left as u32;
                self.energy = self.energy.min(self.max_energy);
            }
            Currency::Exp => self.exp = left,
            Currency::Level => self.level = left as u32,
        }
        true
    }

    /// Additive merge. Energy is capped at max energy after the max is raised.
    pub fn apply(&mut self, delta: &ResourceDelta) {
        self.coins = self.coins.saturating_add(delta.coins);
        self.gems = self.gems.saturating_add(delta.gems);
        self.max_energy = self.max_energy.saturating_add(delta.max_energy);
        self.energy = self.energy.saturating_add(delta.energy).min(self.max_energy);
        self.exp = self.exp.saturating_add(delta.exp);
        self.level = self.level.saturating_add(delta.level);
    }
}

/// Non-negative amounts to add to [`Resources`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceDelta {
    pub coins: u64,
    pub gems: u64,
    pub energy: u32,
    pub max_energy: u32,
    pub exp: u64,
    pub level: u32,
}

impl ResourceDelta {
    pub fn coins(coins: u64) -> Self {
        Self {
            coins,
            ..Self::default()
        }
    }

    pub fn gems(gems: u64) -> Self {
        Self {
            gems,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub total_summons: u64,
    pub total_upgrades: u64,
    /// Seconds of live play.
    pub playtime: u64,
    pub prestige_level: u32,
    pub highest_rarity: Rarity,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            total_summons: 0,
            total_upgrades: 0,
            playtime: 0,
            prestige_level: 0,
            highest_rarity: Rarity::Common,
        }
    }
}

/// Shallow partial update of [`PlayerStats`]; `None` fields are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsUpdate {
    pub total_summons: Option<u64>,
    pub total_upgrades: Option<u64>,
    pub playtime: Option<u64>,
    pub prestige_level: Option<u32>,
    pub highest_rarity: Option<Rarity>,
}

impl PlayerStats {
    pub fn merge(&mut self, update: &StatsUpdate) {
        if let Some(v) = update.total_summons {
            self.total_summons = v;
        }
        if let Some(v) = update.total_upgrades {
            self.total_upgrades = v;
        }
        if let Some(v) = update.playtime {
            self.playtime = v;
        }
        if let Some(v) = update.prestige_level {
            self.prestige_level = v;
        }
        // Highest rarity only ever moves up.
        if let Some(v) = update.highest_rarity {
            self.highest_rarity = self.highest_rarity.max_of(v);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub auto_save: bool,
    pub sound_enabled: bool,
    pub notifications_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            auto_save: true,
            sound_enabled: true,
            notifications_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SettingsUpdate {
    pub auto_save: Option<bool>,
    pub sound_enabled: Option<bool>,
    pub notifications_enabled: Option<bool>,
}

impl GameSettings {
    pub fn merge(&mut self, update: &SettingsUpdate) {
        if let Some(v) = update.auto_save {
            self.auto_save = v;
        }
        if let Some(v) = update.sound_enabled {
            self.sound_enabled = v;
        }
        if let Some(v) = update.notifications_enabled {
            self.notifications_enabled = v;
        }
    }
}

/// The persisted aggregate: one document per player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub resources: Resources,
    pub inventory: Vec<Item>,
    pub stats: PlayerStats,
    #[serde(default)]
    pub settings: GameSettings,
    /// Unix milliseconds of the last save; offline catch-up is measured from here.
    pub last_save: i64,
}

impl GameState {
    /// Creates a fresh game with the documented starting values.
    pub fn new(current_time_ms: i64) -> Self {
        Self {
            resources: Resources::new(),
            inventory: Vec::new(),
            stats: PlayerStats::default(),
            settings: GameSettings::default(),
            last_save: current_time_ms,
        }
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let r = &self.resources;
        if r.level < 1 {
            return Err("resources.level must be at least 1".to_string());
        }
        if r.energy > r.max_energy {
            return Err(format!(
                "resources.energy {} exceeds maxEnergy {}",
                r.energy, r.max_energy
            ));
        }
        for item in &self.inventory {
            if item.level < 1 {
                return Err(format!("item {} has level 0", item.id));
            }
            if !(1..=MAX_STARS).contains(&item.stars) {
                return Err(format!("item {} has {} stars", item.id, item.stars));
            }
        }
        let mut ids: Vec<&str> = self.inventory.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err("inventory contains duplicate item ids".to_string());
        }
        Ok(())
    }

    /// Highest rarity currently held, if any.
    pub fn best_rarity_held(&self) -> Option<Rarity> {
        self.inventory.iter().map(|i| i.rarity).max()
    }
}
