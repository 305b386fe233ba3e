use crate::core::constants::*;
use crate::core::game_state::{GameState, Resources};
use crate::items::types::Rarity;

/// Items at or above this rarity survive a prestige.
pub const PRESTIGE_RETAINED_RARITY: Rarity = Rarity::Mythic;

/// Coin price of the next prestige: `2^prestige_level * 1,000,000`.
/// Saturates at `u64::MAX` for absurd prestige levels.
pub fn prestige_cost(prestige_level: u32) -> u64 {
    1u64.checked_shl(prestige_level)
        .and_then(|factor| factor.checked_mul(PRESTIGE_BASE_COST))
        .unwrap_or(u64::MAX)
}

/// Display bonus shown for the next prestige: +50% per level.
pub fn prestige_bonus(prestige_level: u32) -> f64 {
    (prestige_level as f64 + 1.0) * PRESTIGE_BONUS_PER_LEVEL
}

/// Level gate only. Whether the player can pay is [`can_afford_prestige`].
pub fn is_prestige_eligible(state: &GameState) -> bool {
    state.resources.level >= PRESTIGE_REQUIRED_LEVEL
}

pub fn can_afford_prestige(state: &GameState) -> bool {
    state.resources.coins >= prestige_cost(state.stats.prestige_level)
}

/// The exact predicate [`perform_prestige`] checks.
pub fn can_prestige(state: &GameState) -> bool {
    is_prestige_eligible(state) && can_afford_prestige(state)
}

/// Resets progress for a permanent prestige level.
///
/// Returns false and leaves `state` untouched when the player is not eligible
/// or cannot pay. Otherwise: resources reset (gems kept), prestige level +1,
/// summon/upgrade counters zeroed, inventory cut down to mythic-or-above items.
pub fn perform_prestige(state: &mut GameState) -> bool {
    if !can_prestige(state) {
        return false;
    }

    let gems = state.resources.gems;
    state.resources = Resources {
        gems,
        ..Resources::new()
    };

    state.stats.prestige_level += 1;
    state.stats.total_summons = 0;
    state.stats.total_upgrades = 0;

    state
        .inventory
        .retain(|item| item.rarity >= PRESTIGE_RETAINED_RARITY);

    true
}
