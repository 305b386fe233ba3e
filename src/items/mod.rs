//! Item system: catalog, pools, rarity resolution, summoning and inventory queries.

pub mod catalog;
pub mod drops;
pub mod inventory;
pub mod pools;
pub mod summon;
pub mod types;

pub use catalog::*;
pub use drops::*;
pub use inventory::*;
pub use pools::*;
pub use summon::*;
pub use types::*;
