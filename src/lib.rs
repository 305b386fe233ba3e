//! idlegacha - gacha/idle game-economy engine
//!
//! Summon resolution, item progression, idle accrual and the persisted game
//! state that ties them together. The binaries are thin front ends over
//! [`GameStore`].

pub mod build_info;
pub mod core;
pub mod error;
pub mod items;
pub mod progression;
pub mod save_manager;
pub mod simulator;

pub use crate::core::game_state::GameState;
pub use crate::core::store::GameStore;
pub use error::{Result, StoreError};
