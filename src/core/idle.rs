//! Idle accrual: resources earned from elapsed wall-clock time.
//!
//! Live ticks and offline catch-up both go through [`generate_idle_resources`],
//! so the two agree for the same elapsed time.

use super::constants::*;
use super::game_state::Resources;

/// Coins and gems earned over some elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdleGains {
    pub coins: u64,
    pub gems: u64,
}

impl IdleGains {
    pub fn is_empty(&self) -> bool {
        self.coins == 0 && self.gems == 0
    }
}

/// `floor(floor(elapsed_ms / 1000) * rate * product(multipliers))`.
pub fn calculate_idle_gains(elapsed_ms: i64, rate_per_second: f64, multipliers: &[f64]) -> u64 {
    if elapsed_ms <= 0 {
        return 0;
    }
    let total_multiplier: f64 = multipliers.iter().product();
    let seconds = (elapsed_ms / 1000) as f64;
    (seconds * rate_per_second * total_multiplier).floor() as u64
}

/// Coins per second at a prestige level.
pub fn coins_per_second(prestige_level: u32) -> f64 {
    BASE_COINS_PER_SECOND + prestige_level as f64
}

pub fn idle_gains(elapsed_ms: i64, prestige_level: u32) -> IdleGains {
    IdleGains {
        coins: calculate_idle_gains(elapsed_ms, coins_per_second(prestige_level), &[1.0]),
        gems: calculate_idle_gains(elapsed_ms, BASE_GEMS_PER_SECOND, &[1.0]),
    }
}

/// `current` with idle coins and gems added on top.
pub fn generate_idle_resources(
    elapsed_ms: i64,
    current: &Resources,
    prestige_level: u32,
) -> Resources {
    let gains = idle_gains(elapsed_ms, prestige_level);
    Resources {
        coins: current.coins.saturating_add(gains.coins),
        gems: current.gems.saturating_add(gains.gems),
        ..*current
    }
}

/// One energy per full minute away, never more than `max_energy`.
pub fn calculate_energy_regeneration(elapsed_ms: i64, max_energy: u32) -> u32 {
    if elapsed_ms <= 0 {
        return 0;
    }
    let minutes = elapsed_ms / ENERGY_REGEN_INTERVAL_MS;
    let gained = minutes.saturating_mul(ENERGY_PER_REGEN_INTERVAL as i64);
    gained.min(max_energy as i64) as u32
}

/// Human-readable duration with two units, truncating at each step.
pub fn format_time(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86_400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86_400, (seconds % 86_400) / 3600)
    }
}

/// Compact resource display: 1.5M, 2.3K, 999.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1000 {
        format!("{:.1}K", n as f64 / 1000.0)
    } else {
        n.to_string()
    }
}
