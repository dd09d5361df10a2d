//! Plain entity records shared by every resolver.
//!
//! Nothing here has behavior beyond construction and geometry helpers; the
//! resolvers in `movement`, `combat`, `pickups` and `progression` mutate
//! these records through [`crate::core::ArenaState`].

pub mod types;

pub use types::*;
