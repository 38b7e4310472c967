//! The turn-resolution and rules engine.
//!
//! Stateless per call: every operation reads the current rows through the
//! [`GameStore`] port, applies the fixed ruleset, and writes the resulting
//! transitions back. The only state the engine itself carries is the dice
//! source and the id of the game it drives.

use std::sync::Arc;

use crate::{
    board::{
        rent_for, sale_value, CHANCE_AMOUNTS, DEFAULT_BOARD, DEFAULT_BONUS, DEFAULT_JAIL_FINE,
        DEFAULT_PENALTY, DEFAULT_TAX, IMPROVEMENT_COST, MIN_PLAYERS, PASS_GO_BONUS,
    },
    error::Error,
    models::{BoardSpace, GameStatus, NewSpace, Player, SpaceType},
    ports::{Dice, GameStore},
    Result,
};

/// Everything that happened during one call to [`GameEngine::resolve_turn`].
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The acting player, refreshed after all mutations.
    pub player: Player,
    /// The space the player landed on.
    pub space: BoardSpace,
    /// The two dice as rolled.
    pub dice: (u8, u8),
    /// Human-readable log of what happened, in order.
    pub messages: Vec<String>,
    /// The landed-on property is unowned; the operator may buy it.
    pub needs_buy_decision: bool,
    /// The player landed on their own property (no effect).
    pub landed_on_own_property: bool,
    /// Rent transferred to another owner this turn, if any.
    pub rent_paid: i64,
    /// Names of players eliminated during this call.
    pub eliminated: Vec<String>,
    /// Winner's name if the game completed during this call.
    pub winner: Option<String>,
}

struct PropertyResolution {
    needs_buy: bool,
    landed_on_own: bool,
    rent: i64,
    eliminated: Vec<String>,
}

/// Rules engine for one game.
pub struct GameEngine {
    store: Arc<dyn GameStore + Send + Sync>,
    dice: Box<dyn Dice>,
    game_id: i64,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("game_id", &self.game_id)
            .finish_non_exhaustive()
    }
}

impl GameEngine {
    pub fn new(store: Arc<dyn GameStore + Send + Sync>, dice: Box<dyn Dice>, game_id: i64) -> Self {
        Self {
            store,
            dice,
            game_id,
        }
    }

    /// Create an active game with the default board, seed the players in
    /// the given order, and point the turn at the first of them.
    pub fn new_game_with_defaults(
        store: Arc<dyn GameStore + Send + Sync>,
        dice: Box<dyn Dice>,
        player_names: &[&str],
        starting_money: i64,
    ) -> Result<Self> {
        if player_names.len() < MIN_PLAYERS {
            return Err(Error::InvalidConfiguration {
                message: format!("a game needs at least {MIN_PLAYERS} players"),
            });
        }
        let game = store.create_game(GameStatus::Active)?;
        for (turn_order, name) in player_names.iter().enumerate() {
            store.add_player(game.id, name, starting_money, turn_order as i64)?;
        }
        let engine = Self::new(store, dice, game.id);
        engine.load_default_board()?;
        let active = engine.store.list_players(engine.game_id, true)?;
        if let Some(first) = active.first() {
            engine.store.set_current_turn(engine.game_id, first.id)?;
        }
        Ok(engine)
    }

    pub fn game_id(&self) -> i64 {
        self.game_id
    }

    pub fn store(&self) -> &Arc<dyn GameStore + Send + Sync> {
        &self.store
    }

    /// Seed the fixed 12-space convenience board.
    pub fn load_default_board(&self) -> Result<()> {
        for (sequence_order, spec) in DEFAULT_BOARD.iter().enumerate() {
            self.store.add_space(&NewSpace {
                game_id: self.game_id,
                sequence_order: sequence_order as i64,
                name: spec.name.to_string(),
                kind: spec.kind,
                description: Some(spec.description.to_string()),
                purchase_cost: spec.purchase_cost,
                base_rent: spec.base_rent,
                event_amount: spec.event_amount,
                move_target: spec.move_target,
            })?;
        }
        Ok(())
    }

    /// Setup precondition: the board has at least one space and the game at
    /// least one active player. Fails without mutating anything.
    pub fn ensure_game_ready(&self) -> Result<()> {
        if self.store.count_spaces(self.game_id)? == 0 {
            return Err(Error::BoardEmpty);
        }
        if self.store.list_players(self.game_id, true)?.is_empty() {
            return Err(Error::NoActivePlayers);
        }
        Ok(())
    }

    /// The player the session's turn pointer currently references.
    pub fn current_player(&self) -> Result<Option<Player>> {
        let Some(game) = self.store.get_game(self.game_id)? else {
            return Ok(None);
        };
        let Some(player_id) = game.current_turn_player_id else {
            return Ok(None);
        };
        self.store.get_player(player_id)
    }

    /// Roll, move, and resolve the landing space for one player.
    ///
    /// Movement wraps modulo the board size; passing GO is detected purely
    /// by wraparound, i.e. a strict decrease of the position. Wrapping back
    /// to the exact starting position is not a pass (equality does not
    /// count), and landing on GO itself pays a second, independent credit.
    pub fn resolve_turn(&mut self, player: &Player) -> Result<TurnOutcome> {
        self.ensure_game_ready()?;
        let board_size = self.store.count_spaces(self.game_id)?;

        let (die1, die2) = self.dice.roll_pair();
        let distance = i64::from(die1) + i64::from(die2);

        let new_position = (player.position + distance) % board_size;
        let passed_go = new_position < player.position;
        self.store.update_player_position(player.id, new_position)?;

        let mut messages = vec![format!(
            "Rolled {die1} + {die2} = {distance}. Moved to space {new_position}."
        )];
        let mut eliminated: Vec<String> = Vec::new();

        if passed_go {
            self.store
                .adjust_money(self.game_id, player.id, PASS_GO_BONUS, "Passed GO bonus")?;
            messages.push(format!("Collected ${PASS_GO_BONUS} for passing GO."));
        }

        let space = self
            .store
            .get_space_by_order(self.game_id, new_position)?
            .ok_or(Error::SpaceNotFound {
                game_id: self.game_id,
                position: new_position,
            })?;

        let mut needs_buy = false;
        let mut landed_on_own = false;
        let mut rent_paid = 0;

        if space.is_property() {
            let resolution = self.resolve_property(player, &space)?;
            needs_buy = resolution.needs_buy;
            landed_on_own = resolution.landed_on_own;
            rent_paid = resolution.rent;
            eliminated.extend(resolution.eliminated);
        } else {
            let (event_messages, newly_out) = self.resolve_event_space(player, &space)?;
            messages.extend(event_messages);
            eliminated.extend(newly_out);
        }

        let winner = self.detect_winner()?;

        let refreshed = self
            .store
            .get_player(player.id)?
            .unwrap_or_else(|| player.clone());

        Ok(TurnOutcome {
            player: refreshed,
            space,
            dice: (die1, die2),
            messages,
            needs_buy_decision: needs_buy,
            landed_on_own_property: landed_on_own,
            rent_paid,
            eliminated,
            winner,
        })
    }

    fn resolve_property(&self, player: &Player, space: &BoardSpace) -> Result<PropertyResolution> {
        let state = self
            .store
            .get_property_state(self.game_id, space.id)?
            .ok_or(Error::PropertyStateMissing { space_id: space.id })?;

        let Some(owner_id) = state.owner_id else {
            return Ok(PropertyResolution {
                needs_buy: true,
                landed_on_own: false,
                rent: 0,
                eliminated: Vec::new(),
            });
        };

        if owner_id == player.id {
            return Ok(PropertyResolution {
                needs_buy: false,
                landed_on_own: true,
                rent: 0,
                eliminated: Vec::new(),
            });
        }

        let rent = rent_for(space, &state);
        self.store.transfer_money(
            self.game_id,
            player.id,
            owner_id,
            rent,
            &format!("Rent for {}", space.name),
        )?;

        let eliminated = self.handle_bankruptcy(player.id)?;
        Ok(PropertyResolution {
            needs_buy: false,
            landed_on_own: false,
            rent,
            eliminated,
        })
    }

    /// Apply the effect of a non-property space. One behavioral branch per
    /// variant; a zero event amount falls back to the variant's default.
    fn resolve_event_space(
        &mut self,
        player: &Player,
        space: &BoardSpace,
    ) -> Result<(Vec<String>, Vec<String>)> {
        let mut messages = Vec::new();

        let payout = match space.kind {
            // Landing exactly on GO pays again, on top of any passive
            // pass-GO bonus already credited this turn.
            SpaceType::Go => {
                let payout = if space.event_amount != 0 {
                    space.event_amount
                } else {
                    PASS_GO_BONUS
                };
                messages.push(format!("Landed on GO and collected ${payout}."));
                payout
            }
            SpaceType::Bonus => {
                let payout = if space.event_amount != 0 {
                    space.event_amount
                } else {
                    DEFAULT_BONUS
                };
                messages.push(format!("Bonus space! Received ${payout}."));
                payout
            }
            SpaceType::Tax => {
                let fee = if space.event_amount != 0 {
                    space.event_amount.abs()
                } else {
                    DEFAULT_TAX
                };
                messages.push(format!("Tax time. Paid ${fee}."));
                -fee
            }
            SpaceType::Penalty => {
                let fee = if space.event_amount != 0 {
                    space.event_amount.abs()
                } else {
                    DEFAULT_PENALTY
                };
                messages.push(format!("Penalty applied: ${fee}."));
                -fee
            }
            SpaceType::Jail => {
                // Overwrites the position a second time, after the movement
                // write in resolve_turn. No target means the jail space is
                // its own destination.
                if let Some(target) = space.move_target {
                    self.store.update_player_position(player.id, target)?;
                }
                let payout = if space.event_amount != 0 {
                    space.event_amount
                } else {
                    -DEFAULT_JAIL_FINE
                };
                messages.push("Sent to jail. Paying fine and moving to jail space.".to_string());
                payout
            }
            SpaceType::Chance => {
                let payout = self.dice.draw(&CHANCE_AMOUNTS);
                let verb = if payout > 0 { "gain" } else { "lose" };
                messages.push(format!("Chance card effect: {verb} ${}.", payout.abs()));
                payout
            }
            SpaceType::Free => {
                messages.push("Nothing happens here.".to_string());
                0
            }
            // Property landings are resolved by resolve_property.
            SpaceType::Property => 0,
        };

        let mut eliminated = Vec::new();
        if payout != 0 {
            self.store.adjust_money(
                self.game_id,
                player.id,
                payout,
                &format!("Event {}", space.name),
            )?;
            eliminated = self.handle_bankruptcy(player.id)?;
        }

        Ok((messages, eliminated))
    }

    /// Buy the unowned property the player is standing on.
    ///
    /// Returns `false` without mutating anything when the property already
    /// has an owner or the player cannot cover the purchase cost.
    pub fn buy_property(&self, player: &Player, space: &BoardSpace) -> Result<bool> {
        let Some(state) = self.store.get_property_state(self.game_id, space.id)? else {
            return Ok(false);
        };
        if state.owner_id.is_some() {
            return Ok(false);
        }
        let cost = space.purchase_cost.unwrap_or(0);
        if player.money < cost {
            return Ok(false);
        }
        self.store.adjust_money(
            self.game_id,
            player.id,
            -cost,
            &format!("Bought {}", space.name),
        )?;
        self.store.set_property_owner(
            self.game_id,
            space.id,
            Some(player.id),
            Some(state.improvement_count),
        )?;
        Ok(true)
    }

    /// Add one improvement to a property the player owns. No cap.
    pub fn improve_property(&self, player: &Player, space: &BoardSpace) -> Result<bool> {
        let Some(state) = self.store.get_property_state(self.game_id, space.id)? else {
            return Ok(false);
        };
        if !state.is_owned_by(player.id) || player.money < IMPROVEMENT_COST {
            return Ok(false);
        }
        self.store.adjust_money(
            self.game_id,
            player.id,
            -IMPROVEMENT_COST,
            &format!("Improved {}", space.name),
        )?;
        self.store.increment_improvement(self.game_id, space.id)?;
        Ok(true)
    }

    /// Sell an owned property back to the bank at half value.
    ///
    /// Returns the sale value credited, or 0 when the player is not the
    /// owner (no mutation in that case).
    pub fn sell_property(&self, player: &Player, space: &BoardSpace) -> Result<i64> {
        let Some(state) = self.store.get_property_state(self.game_id, space.id)? else {
            return Ok(0);
        };
        if !state.is_owned_by(player.id) {
            return Ok(0);
        }
        let value = sale_value(space, &state);
        self.store
            .set_property_owner(self.game_id, space.id, None, Some(0))?;
        self.store.adjust_money(
            self.game_id,
            player.id,
            value,
            &format!("Sold {} to bank", space.name),
        )?;
        Ok(value)
    }

    /// Forced liquidation: sell everything the player owns back to the
    /// bank, crediting the sale value for each property.
    pub fn sell_all_properties(&self, player_id: i64) -> Result<()> {
        for (space, state) in self.store.properties_by_owner(self.game_id, player_id)? {
            let value = sale_value(&space, &state);
            self.store
                .set_property_owner(self.game_id, space.id, None, Some(0))?;
            self.store.adjust_money(
                self.game_id,
                player_id,
                value,
                &format!("Forced sale of {}", space.name),
            )?;
        }
        Ok(())
    }

    /// Two-phase bankruptcy check: if the balance is at or below zero,
    /// liquidate everything, then eliminate the player if that was not
    /// enough. Returns the names of players eliminated (zero or one).
    fn handle_bankruptcy(&self, player_id: i64) -> Result<Vec<String>> {
        let mut eliminated = Vec::new();
        let Some(player) = self.store.get_player(player_id)? else {
            return Ok(eliminated);
        };
        if player.money > 0 {
            return Ok(eliminated);
        }

        self.sell_all_properties(player_id)?;

        if let Some(after_sale) = self.store.get_player(player_id)? {
            if after_sale.money <= 0 {
                self.store.update_player_active(player_id, false)?;
                eliminated.push(after_sale.name);
                self.store
                    .release_properties_to_bank(self.game_id, player_id)?;
                self.store.reset_turn_orders(self.game_id)?;
            }
        }
        Ok(eliminated)
    }

    /// The game ends the instant exactly one active player remains; marks
    /// the session completed and returns the winner's name.
    fn detect_winner(&self) -> Result<Option<String>> {
        let active = self.store.list_players(self.game_id, true)?;
        if active.len() == 1 {
            self.store
                .update_game_status(self.game_id, GameStatus::Completed)?;
            return Ok(Some(active[0].name.clone()));
        }
        Ok(None)
    }

    /// Advance the turn pointer to the next active player, circularly.
    ///
    /// When the current pointer no longer matches an active player (it was
    /// just eliminated), the search falls through to index 0 of the sorted
    /// active list. Returns `None` when no active players remain.
    pub fn next_turn(&self) -> Result<Option<Player>> {
        let active = self.store.list_players(self.game_id, true)?;
        if active.is_empty() {
            return Ok(None);
        }
        let current_id = self
            .store
            .get_game(self.game_id)?
            .and_then(|game| game.current_turn_player_id);
        let current_index = active
            .iter()
            .position(|player| Some(player.id) == current_id)
            .map(|index| index as i64)
            .unwrap_or(-1);
        let next = &active[((current_index + 1) as usize) % active.len()];
        self.store.set_current_turn(self.game_id, next.id)?;
        Ok(Some(next.clone()))
    }
}
