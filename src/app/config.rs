//! Configuration for the persistence collaborator.
//!
//! Connection settings are passed explicitly into the store constructor;
//! there are no hidden process-wide lookups.

/// Connection settings for the SQLite store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// sqlx connection string, e.g. `sqlite://boardwalk.db`.
    pub database_url: String,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }
}
