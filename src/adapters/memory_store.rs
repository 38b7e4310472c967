//! In-memory game store for testing.
//!
//! This adapter provides a pure in-memory implementation of [`GameStore`],
//! enabling fast engine tests without a database. All clones share the same
//! underlying storage.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use chrono::Utc;

use crate::{
    error::Error,
    models::{BoardSpace, GameSession, GameStatus, LedgerEntry, NewSpace, Player, PropertyState},
    ports::GameStore,
    Result,
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    games: BTreeMap<i64, GameSession>,
    players: BTreeMap<i64, Player>,
    spaces: BTreeMap<i64, BoardSpace>,
    property_states: BTreeMap<i64, PropertyState>,
    ledger: Vec<LedgerEntry>,
}

impl Inner {
    fn alloc_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn player_mut(&mut self, player_id: i64) -> Result<&mut Player> {
        self.players
            .get_mut(&player_id)
            .ok_or(Error::PlayerNotFound { player_id })
    }

    fn state_for_space_mut(&mut self, game_id: i64, space_id: i64) -> Option<&mut PropertyState> {
        self.property_states
            .values_mut()
            .find(|ps| ps.game_id == game_id && ps.space_id == space_id)
    }

    fn append_ledger(&mut self, game_id: i64, player_id: i64, amount: i64, memo: &str) {
        let id = self.alloc_id();
        self.ledger.push(LedgerEntry {
            id,
            game_id,
            player_id,
            amount,
            memo: memo.to_string(),
        });
    }

    fn adjust(&mut self, game_id: i64, player_id: i64, delta: i64, memo: &str) -> Result<Player> {
        let player = self.player_mut(player_id)?;
        player.money += delta;
        let refreshed = player.clone();
        self.append_ledger(game_id, player_id, delta, memo);
        Ok(refreshed)
    }
}

/// HashMap-backed store for tests; thread-safe and cheap to clone.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger entries for a game, in append order. Test-only accessor; the
    /// engine itself never reads the ledger back.
    pub fn ledger(&self, game_id: i64) -> Vec<LedgerEntry> {
        self.inner
            .lock()
            .unwrap()
            .ledger
            .iter()
            .filter(|e| e.game_id == game_id)
            .cloned()
            .collect()
    }
}

impl GameStore for MemoryStore {
    fn create_game(&self, status: GameStatus) -> Result<GameSession> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        let game = GameSession {
            id,
            status,
            current_turn_player_id: None,
            created_at: Utc::now().naive_utc(),
        };
        inner.games.insert(id, game.clone());
        Ok(game)
    }

    fn get_game(&self, game_id: i64) -> Result<Option<GameSession>> {
        Ok(self.inner.lock().unwrap().games.get(&game_id).cloned())
    }

    fn update_game_status(&self, game_id: i64, status: GameStatus) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let game = inner
            .games
            .get_mut(&game_id)
            .ok_or(Error::GameNotFound { game_id })?;
        game.status = status;
        Ok(())
    }

    fn set_current_turn(&self, game_id: i64, player_id: i64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let game = inner
            .games
            .get_mut(&game_id)
            .ok_or(Error::GameNotFound { game_id })?;
        game.current_turn_player_id = Some(player_id);
        Ok(())
    }

    fn add_player(
        &self,
        game_id: i64,
        name: &str,
        starting_money: i64,
        turn_order: i64,
    ) -> Result<Player> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        let player = Player {
            id,
            game_id,
            name: name.to_string(),
            money: starting_money,
            position: 0,
            is_active: true,
            turn_order,
        };
        inner.players.insert(id, player.clone());
        Ok(player)
    }

    fn list_players(&self, game_id: i64, active_only: bool) -> Result<Vec<Player>> {
        let inner = self.inner.lock().unwrap();
        let mut players: Vec<Player> = inner
            .players
            .values()
            .filter(|p| p.game_id == game_id && (!active_only || p.is_active))
            .cloned()
            .collect();
        players.sort_by_key(|p| (p.turn_order, p.id));
        Ok(players)
    }

    fn get_player(&self, player_id: i64) -> Result<Option<Player>> {
        Ok(self.inner.lock().unwrap().players.get(&player_id).cloned())
    }

    fn update_player_position(&self, player_id: i64, position: i64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.player_mut(player_id)?.position = position;
        Ok(())
    }

    fn update_player_active(&self, player_id: i64, is_active: bool) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.player_mut(player_id)?.is_active = is_active;
        Ok(())
    }

    fn adjust_money(
        &self,
        game_id: i64,
        player_id: i64,
        delta: i64,
        memo: &str,
    ) -> Result<Player> {
        self.inner
            .lock()
            .unwrap()
            .adjust(game_id, player_id, delta, memo)
    }

    fn set_money(&self, player_id: i64, amount: i64) -> Result<Player> {
        let mut inner = self.inner.lock().unwrap();
        let player = inner.player_mut(player_id)?;
        let delta = amount - player.money;
        player.money = amount;
        let refreshed = player.clone();
        inner.append_ledger(refreshed.game_id, player_id, delta, "Balance set");
        Ok(refreshed)
    }

    fn transfer_money(
        &self,
        game_id: i64,
        payer_id: i64,
        payee_id: i64,
        amount: i64,
        memo: &str,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.adjust(game_id, payer_id, -amount, &format!("Paid {amount} for {memo}"))?;
        inner.adjust(
            game_id,
            payee_id,
            amount,
            &format!("Received {amount} for {memo}"),
        )?;
        Ok(())
    }

    fn reset_turn_orders(&self, game_id: i64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let mut active_ids: Vec<(i64, i64)> = inner
            .players
            .values()
            .filter(|p| p.game_id == game_id && p.is_active)
            .map(|p| (p.turn_order, p.id))
            .collect();
        active_ids.sort();
        for (rank, (_, id)) in active_ids.into_iter().enumerate() {
            inner.player_mut(id)?.turn_order = rank as i64;
        }
        Ok(())
    }

    fn remove_player(&self, player_id: i64) -> Result<()> {
        self.inner.lock().unwrap().players.remove(&player_id);
        Ok(())
    }

    fn add_space(&self, space: &NewSpace) -> Result<BoardSpace> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.alloc_id();
        let row = BoardSpace {
            id,
            game_id: space.game_id,
            sequence_order: space.sequence_order,
            name: space.name.clone(),
            kind: space.kind,
            description: space.description.clone(),
            purchase_cost: space.purchase_cost,
            base_rent: space.base_rent,
            event_amount: space.event_amount,
            move_target: space.move_target,
        };
        inner.spaces.insert(id, row.clone());
        if row.is_property() {
            let ps_id = inner.alloc_id();
            inner.property_states.insert(
                ps_id,
                PropertyState {
                    id: ps_id,
                    game_id: row.game_id,
                    space_id: row.id,
                    owner_id: None,
                    improvement_count: 0,
                },
            );
        }
        Ok(row)
    }

    fn list_spaces(&self, game_id: i64) -> Result<Vec<BoardSpace>> {
        let inner = self.inner.lock().unwrap();
        let mut spaces: Vec<BoardSpace> = inner
            .spaces
            .values()
            .filter(|s| s.game_id == game_id)
            .cloned()
            .collect();
        spaces.sort_by_key(|s| s.sequence_order);
        Ok(spaces)
    }

    fn get_space_by_order(
        &self,
        game_id: i64,
        sequence_order: i64,
    ) -> Result<Option<BoardSpace>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .spaces
            .values()
            .find(|s| s.game_id == game_id && s.sequence_order == sequence_order)
            .cloned())
    }

    fn get_space_by_id(&self, space_id: i64) -> Result<Option<BoardSpace>> {
        Ok(self.inner.lock().unwrap().spaces.get(&space_id).cloned())
    }

    fn count_spaces(&self, game_id: i64) -> Result<i64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.spaces.values().filter(|s| s.game_id == game_id).count() as i64)
    }

    fn next_sequence_order(&self, game_id: i64) -> Result<i64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .spaces
            .values()
            .filter(|s| s.game_id == game_id)
            .map(|s| s.sequence_order + 1)
            .max()
            .unwrap_or(0))
    }

    fn get_property_state(&self, game_id: i64, space_id: i64) -> Result<Option<PropertyState>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .property_states
            .values()
            .find(|ps| ps.game_id == game_id && ps.space_id == space_id)
            .cloned())
    }

    fn set_property_owner(
        &self,
        game_id: i64,
        space_id: i64,
        owner_id: Option<i64>,
        improvement_count: Option<i64>,
    ) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        let state = inner
            .state_for_space_mut(game_id, space_id)
            .ok_or(Error::PropertyStateMissing { space_id })?;
        state.owner_id = owner_id;
        if let Some(count) = improvement_count {
            state.improvement_count = count;
        }
        Ok(())
    }

    fn increment_improvement(&self, game_id: i64, space_id: i64) -> Result<PropertyState> {
        let mut inner = self.inner.lock().unwrap();
        let state = inner
            .state_for_space_mut(game_id, space_id)
            .ok_or(Error::PropertyStateMissing { space_id })?;
        state.improvement_count += 1;
        Ok(state.clone())
    }

    fn properties_by_owner(
        &self,
        game_id: i64,
        owner_id: i64,
    ) -> Result<Vec<(BoardSpace, PropertyState)>> {
        let inner = self.inner.lock().unwrap();
        let mut owned: Vec<(BoardSpace, PropertyState)> = inner
            .property_states
            .values()
            .filter(|ps| ps.game_id == game_id && ps.owner_id == Some(owner_id))
            .filter_map(|ps| {
                inner
                    .spaces
                    .get(&ps.space_id)
                    .map(|space| (space.clone(), ps.clone()))
            })
            .collect();
        owned.sort_by_key(|(space, _)| space.sequence_order);
        Ok(owned)
    }

    fn release_properties_to_bank(&self, game_id: i64, owner_id: i64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        for state in inner.property_states.values_mut() {
            if state.game_id == game_id && state.owner_id == Some(owner_id) {
                state.owner_id = None;
                state.improvement_count = 0;
            }
        }
        Ok(())
    }

    fn apply_schema(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        *inner = Inner::default();
        Ok(())
    }
}
