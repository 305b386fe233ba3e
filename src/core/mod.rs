//! Core game state, idle accrual and the store that owns them.

pub mod constants;
pub mod game_loop;
pub mod game_state;
pub mod idle;
pub mod offline;
pub mod store;

pub use game_loop::{GameLoop, LoopConfig, Ticker};
pub use game_state::*;
pub use idle::*;
pub use offline::{process_offline_progression, OfflineReport};
pub use store::{GameStore, SharedStore, SummonOutcome};
