//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the traits defined in the ports
//! module. Following hexagonal architecture, adapters depend on domain
//! ports, not the other way around.

pub mod dice;
pub mod memory_store;
pub mod sqlite_store;

pub use dice::{ScriptedDice, StdDice};
pub use memory_store::MemoryStore;
pub use sqlite_store::SqliteStore;
