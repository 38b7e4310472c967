//! Application layer with dependency injection.
//!
//! The container owns the infrastructure dependencies (the game store and
//! the dice source) and provides factory methods for building rules
//! engines, so commands and tests never wire adapters by hand.

pub mod config;
pub mod container;

pub use config::StoreConfig;
pub use container::{App, AppBuilder};
