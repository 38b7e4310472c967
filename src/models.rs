//! Domain records mirroring the relational schema.
//!
//! These are plain data carriers with no behavior beyond small invariant
//! helpers; every row-shaped type derives [`sqlx::FromRow`] so the SQLite
//! adapter can map query results directly.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle of a game session, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Setup,
    Active,
    Completed,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Setup => write!(f, "setup"),
            GameStatus::Active => write!(f, "active"),
            GameStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One game; `current_turn_player_id` is null until the game starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GameSession {
    pub id: i64,
    pub status: GameStatus,
    pub current_turn_player_id: Option<i64>,
    pub created_at: NaiveDateTime,
}

/// A participant in exactly one game.
///
/// `money` is signed and may dip below zero transiently inside a single
/// engine call; bankruptcy resolution restores the invariant before control
/// returns. `turn_order` is a dense zero-based rank among active players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Player {
    pub id: i64,
    pub game_id: i64,
    pub name: String,
    pub money: i64,
    pub position: i64,
    pub is_active: bool,
    pub turn_order: i64,
}

/// Closed set of space categories; the rules engine matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    Property,
    Go,
    Tax,
    Bonus,
    Jail,
    Chance,
    Penalty,
    Free,
}

impl SpaceType {
    /// Every variant except `Property`, in board-builder menu order.
    pub const EVENT_TYPES: [SpaceType; 7] = [
        SpaceType::Go,
        SpaceType::Tax,
        SpaceType::Bonus,
        SpaceType::Jail,
        SpaceType::Chance,
        SpaceType::Penalty,
        SpaceType::Free,
    ];
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpaceType::Property => "property",
            SpaceType::Go => "go",
            SpaceType::Tax => "tax",
            SpaceType::Bonus => "bonus",
            SpaceType::Jail => "jail",
            SpaceType::Chance => "chance",
            SpaceType::Penalty => "penalty",
            SpaceType::Free => "free",
        };
        write!(f, "{name}")
    }
}

/// One cell of the cyclic board; immutable after creation.
///
/// `purchase_cost` and `base_rent` are meaningful only for property spaces,
/// `event_amount` for event spaces (signed payout or fee), and `move_target`
/// only for jail-type spaces that redirect the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BoardSpace {
    pub id: i64,
    pub game_id: i64,
    pub sequence_order: i64,
    pub name: String,
    pub kind: SpaceType,
    pub description: Option<String>,
    pub purchase_cost: Option<i64>,
    pub base_rent: Option<i64>,
    pub event_amount: i64,
    pub move_target: Option<i64>,
}

impl BoardSpace {
    pub fn is_property(&self) -> bool {
        self.kind == SpaceType::Property
    }
}

/// Parameters for creating a board space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpace {
    pub game_id: i64,
    pub sequence_order: i64,
    pub name: String,
    pub kind: SpaceType,
    pub description: Option<String>,
    pub purchase_cost: Option<i64>,
    pub base_rent: Option<i64>,
    pub event_amount: i64,
    pub move_target: Option<i64>,
}

/// Ownership and improvement state, one-to-one with a property space.
///
/// `owner_id = None` means the bank owns the property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PropertyState {
    pub id: i64,
    pub game_id: i64,
    pub space_id: i64,
    pub owner_id: Option<i64>,
    pub improvement_count: i64,
}

impl PropertyState {
    pub fn is_owned_by(&self, player_id: i64) -> bool {
        self.owner_id == Some(player_id)
    }
}

/// Immutable audit record of a single money movement.
///
/// Appended by every mutating money call; never read back by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LedgerEntry {
    pub id: i64,
    pub game_id: i64,
    pub player_id: i64,
    pub amount: i64,
    pub memo: String,
}
