//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the rules engine and
//! infrastructure. Following hexagonal architecture, these traits are owned
//! by the domain and implemented by adapters in the infrastructure layer.

pub mod dice;
pub mod store;

pub use dice::Dice;
pub use store::GameStore;
