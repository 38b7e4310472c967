//! Dependency injection container for the boardwalk application.
//!
//! Centralizes creation and wiring of dependencies: the container owns the
//! game store and the default dice seed, and hands out rules engines bound
//! to a game.

use std::sync::Arc;

use super::config::StoreConfig;
use crate::{
    adapters::{MemoryStore, SqliteStore, StdDice},
    engine::GameEngine,
    ports::{Dice, GameStore},
    Result,
};

/// Application container.
///
/// Production code connects to SQLite via [`App::connect`]; tests inject a
/// [`MemoryStore`] and a fixed seed through [`App::for_testing`].
pub struct App {
    store: Arc<dyn GameStore + Send + Sync>,
    default_seed: Option<u64>,
}

impl App {
    /// Connect to the database named by the config and build the container.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        Ok(Self {
            store: Arc::new(SqliteStore::connect(&config.database_url)?),
            default_seed: None,
        })
    }

    /// Builder for tests; defaults to an in-memory store.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Fix the dice seed for every engine this container builds.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn store(&self) -> Arc<dyn GameStore + Send + Sync> {
        Arc::clone(&self.store)
    }

    fn dice(&self) -> Box<dyn Dice> {
        match self.default_seed {
            Some(seed) => Box::new(StdDice::from_seed(seed)),
            None => Box::new(StdDice::new()),
        }
    }

    /// Rules engine bound to an existing game.
    pub fn engine(&self, game_id: i64) -> GameEngine {
        GameEngine::new(self.store(), self.dice(), game_id)
    }

    /// Create a ready-to-play game on the default board.
    pub fn new_game(&self, player_names: &[&str], starting_money: i64) -> Result<GameEngine> {
        GameEngine::new_game_with_defaults(self.store(), self.dice(), player_names, starting_money)
    }
}

/// Builder for constructing the container with custom dependencies.
pub struct AppBuilder {
    store: Option<Arc<dyn GameStore + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            default_seed: None,
        }
    }

    pub fn with_store<S: GameStore + Send + Sync + 'static>(mut self, store: S) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the container; falls back to an in-memory store when none was
    /// provided.
    pub fn build(self) -> App {
        App {
            store: self.store.unwrap_or_else(|| Arc::new(MemoryStore::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
