//! Combat resolution: the player's area attack and monster contact damage.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
