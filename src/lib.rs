//! Boardwalk: a terminal Monopoly-style board game backed by SQLite.
//!
//! This crate provides:
//! - A turn-resolution and rules engine (dice, movement with wraparound,
//!   property transactions, event spaces, bankruptcy, win detection)
//! - A synchronous persistence port with SQLite and in-memory adapters
//! - An interactive CLI that drives one game at a time

pub mod adapters;
pub mod app;
pub mod board;
pub mod cli;
pub mod engine;
pub mod error;
pub mod models;
pub mod ports;

pub use engine::{GameEngine, TurnOutcome};
pub use error::{Error, Result};
