//! Monte Carlo summon simulator.
//!
//! Draws a pool many times to check:
//! - Observed rarity frequencies against the configured rates
//! - How often draws fall back to common or come up empty
//! - Average item power per pool

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{DrawTally, RarityRow, SimReport};
pub use runner::{run_simulation, simulate_pool};
