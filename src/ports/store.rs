//! Persistence port for game state.
//!
//! This trait is the boundary between the rules engine and the relational
//! store. Calls are synchronous and one-at-a-time; each mutating money call
//! also appends an immutable ledger entry that the engine never reads back.

use crate::{
    models::{BoardSpace, GameSession, GameStatus, NewSpace, Player, PropertyState},
    Result,
};

/// CRUD contract over games, players, spaces, and property ownership.
///
/// Implementations must keep two invariants: every property space gets
/// exactly one [`PropertyState`] row created together with the space, and
/// [`reset_turn_orders`](GameStore::reset_turn_orders) leaves active
/// players' ranks as a dense `0..k` sequence.
pub trait GameStore {
    // --- games ---

    fn create_game(&self, status: GameStatus) -> Result<GameSession>;
    fn get_game(&self, game_id: i64) -> Result<Option<GameSession>>;
    fn update_game_status(&self, game_id: i64, status: GameStatus) -> Result<()>;
    fn set_current_turn(&self, game_id: i64, player_id: i64) -> Result<()>;

    // --- players ---

    fn add_player(
        &self,
        game_id: i64,
        name: &str,
        starting_money: i64,
        turn_order: i64,
    ) -> Result<Player>;

    /// Players of a game ordered by `turn_order`, optionally active only.
    fn list_players(&self, game_id: i64, active_only: bool) -> Result<Vec<Player>>;
    fn get_player(&self, player_id: i64) -> Result<Option<Player>>;
    fn update_player_position(&self, player_id: i64, position: i64) -> Result<()>;
    fn update_player_active(&self, player_id: i64, is_active: bool) -> Result<()>;

    /// Apply a signed delta to a player's balance, append a ledger entry,
    /// and return the refreshed player.
    fn adjust_money(&self, game_id: i64, player_id: i64, delta: i64, memo: &str)
        -> Result<Player>;

    /// Overwrite a player's balance, recording the implied delta in the
    /// ledger.
    fn set_money(&self, player_id: i64, amount: i64) -> Result<Player>;

    /// Debit the payer and credit the payee, appending one ledger entry for
    /// each side of the movement.
    fn transfer_money(
        &self,
        game_id: i64,
        payer_id: i64,
        payee_id: i64,
        amount: i64,
        memo: &str,
    ) -> Result<()>;

    /// Renormalize active players' turn order to a dense `0..k` sequence,
    /// preserving their current relative order.
    fn reset_turn_orders(&self, game_id: i64) -> Result<()>;

    /// Hard-delete a player. Administrative only; normal play eliminates
    /// players by clearing `is_active` instead.
    fn remove_player(&self, player_id: i64) -> Result<()>;

    // --- spaces ---

    /// Insert a board space; for property spaces the matching
    /// [`PropertyState`] row is created in the same operation.
    fn add_space(&self, space: &NewSpace) -> Result<BoardSpace>;
    fn list_spaces(&self, game_id: i64) -> Result<Vec<BoardSpace>>;
    fn get_space_by_order(&self, game_id: i64, sequence_order: i64)
        -> Result<Option<BoardSpace>>;
    fn get_space_by_id(&self, space_id: i64) -> Result<Option<BoardSpace>>;
    fn count_spaces(&self, game_id: i64) -> Result<i64>;

    /// Next free `sequence_order` for the game's board (0 when empty).
    fn next_sequence_order(&self, game_id: i64) -> Result<i64>;

    // --- property states ---

    fn get_property_state(&self, game_id: i64, space_id: i64) -> Result<Option<PropertyState>>;

    /// Set the owner (None = bank) and, when given, the improvement count.
    fn set_property_owner(
        &self,
        game_id: i64,
        space_id: i64,
        owner_id: Option<i64>,
        improvement_count: Option<i64>,
    ) -> Result<()>;

    fn increment_improvement(&self, game_id: i64, space_id: i64) -> Result<PropertyState>;

    /// All properties owned by a player, joined with their spaces, ordered
    /// by board position.
    fn properties_by_owner(
        &self,
        game_id: i64,
        owner_id: i64,
    ) -> Result<Vec<(BoardSpace, PropertyState)>>;

    /// Return every property a player still owns to the bank, resetting
    /// improvements to zero.
    fn release_properties_to_bank(&self, game_id: i64, owner_id: i64) -> Result<()>;

    // --- schema ---

    /// Drop and recreate the schema. Destructive; only invoked behind an
    /// operator confirmation.
    fn apply_schema(&self) -> Result<()>;
}
