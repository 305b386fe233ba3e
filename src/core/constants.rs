// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const AUTOSAVE_INTERVAL_MS: u64 = 5000;
/// Store-level offline catch-up only runs past this much time away.
pub const OFFLINE_CATCHUP_THRESHOLD_MS: i64 = 10_000;
/// The "welcome back" summary is only shown past this much time away.
pub const WELCOME_BACK_THRESHOLD_MS: i64 = 30_000;

// Idle accrual
pub const BASE_COINS_PER_SECOND: f64 = 1.0;
pub const BASE_GEMS_PER_SECOND: f64 = 0.1;
pub const ENERGY_REGEN_INTERVAL_MS: i64 = 60_000;
pub const ENERGY_PER_REGEN_INTERVAL: u32 = 1;

// Summoning
pub const POWER_VARIANCE: f64 = 0.10;
/// Float slack when deciding whether a rate table sums to 1.
pub const RATE_EPSILON: f64 = 1e-9;
pub const MULTI_SUMMON_COUNT: u32 = 10;

// Item progression
pub const UPGRADE_BASE_COST: f64 = 50.0;
pub const UPGRADE_COST_GROWTH: f64 = 1.5;
pub const UPGRADE_POWER_MULTIPLIER: f64 = 1.2;
pub const MAX_ITEM_LEVEL: u32 = 100;
pub const STAR_UPGRADE_GEM_COST: u64 = 1000;
pub const STAR_POWER_MULTIPLIER: f64 = 1.5;
pub const MAX_STARS: u32 = 5;

// Player leveling
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;
pub const EXP_PER_SUMMONED_ITEM: u64 = 10;
pub const EXP_PER_UPGRADE: u64 = 5;

// Prestige
pub const PRESTIGE_REQUIRED_LEVEL: u32 = 50;
pub const PRESTIGE_BASE_COST: u64 = 1_000_000;
pub const PRESTIGE_BONUS_PER_LEVEL: f64 = 0.5;

// Fresh game
pub const INITIAL_COINS: u64 = 1000;
pub const INITIAL_GEMS: u64 = 50;
pub const INITIAL_ENERGY: u32 = 100;
pub const INITIAL_MAX_ENERGY: u32 = 100;

// Save file
pub const SAVE_VERSION: u32 = 1;
pub const SAVE_FILE_NAME: &str = "save.json";
