//! Item upgrades, player leveling and prestige.

pub mod leveling;
pub mod prestige;
pub mod upgrade;

pub use leveling::*;
pub use prestige::*;
pub use upgrade::*;
