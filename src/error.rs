//! Error types for the boardwalk crate

use thiserror::Error;

/// Main error type for the boardwalk crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("board has no spaces; add spaces before playing")]
    BoardEmpty,

    #[error("no active players; add players before playing")]
    NoActivePlayers,

    #[error("game {game_id} not found")]
    GameNotFound { game_id: i64 },

    #[error("player {player_id} not found")]
    PlayerNotFound { player_id: i64 },

    #[error("no space at position {position} on the board for game {game_id}")]
    SpaceNotFound { game_id: i64, position: i64 },

    #[error("property state missing for space {space_id} (every property space must have one)")]
    PropertyStateMissing { space_id: i64 },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to {operation}: {source}")]
    Runtime {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
