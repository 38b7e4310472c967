//! Common test utilities for the boardwalk test suite.
//!
//! Builders for in-memory games with hand-crafted boards, plus an engine
//! constructor wired to scripted dice so every landing is deterministic.
#![allow(dead_code)]

use std::sync::Arc;

use boardwalk::{
    adapters::{MemoryStore, ScriptedDice},
    engine::GameEngine,
    models::{GameStatus, NewSpace, Player, SpaceType},
    ports::GameStore,
};

/// Create an active game with the given players (turn order follows the
/// slice order) and point the turn at the first of them.
pub fn active_game(store: &MemoryStore, names: &[&str], starting_money: i64) -> i64 {
    let game = store.create_game(GameStatus::Active).unwrap();
    for (turn_order, name) in names.iter().enumerate() {
        store
            .add_player(game.id, name, starting_money, turn_order as i64)
            .unwrap();
    }
    let first = store.list_players(game.id, true).unwrap()[0].id;
    store.set_current_turn(game.id, first).unwrap();
    game.id
}

/// Engine over a shared in-memory store with scripted dice.
pub fn engine_with(store: &MemoryStore, game_id: i64, dice: ScriptedDice) -> GameEngine {
    GameEngine::new(Arc::new(store.clone()), Box::new(dice), game_id)
}

pub fn player_named(store: &MemoryStore, game_id: i64, name: &str) -> Player {
    store
        .list_players(game_id, false)
        .unwrap()
        .into_iter()
        .find(|p| p.name == name)
        .unwrap_or_else(|| panic!("no player named {name}"))
}

pub fn free(game_id: i64, order: i64) -> NewSpace {
    NewSpace {
        game_id,
        sequence_order: order,
        name: format!("Free {order}"),
        kind: SpaceType::Free,
        description: None,
        purchase_cost: None,
        base_rent: None,
        event_amount: 0,
        move_target: None,
    }
}

pub fn property(game_id: i64, order: i64, cost: i64, rent: i64) -> NewSpace {
    NewSpace {
        game_id,
        sequence_order: order,
        name: format!("Property {order}"),
        kind: SpaceType::Property,
        description: None,
        purchase_cost: Some(cost),
        base_rent: Some(rent),
        event_amount: 0,
        move_target: None,
    }
}

pub fn event(game_id: i64, order: i64, kind: SpaceType, amount: i64) -> NewSpace {
    NewSpace {
        game_id,
        sequence_order: order,
        name: format!("{kind} {order}"),
        kind,
        description: None,
        purchase_cost: None,
        base_rent: None,
        event_amount: amount,
        move_target: None,
    }
}

pub fn jail(game_id: i64, order: i64, amount: i64, move_target: Option<i64>) -> NewSpace {
    NewSpace {
        move_target,
        ..event(game_id, order, SpaceType::Jail, amount)
    }
}

/// Build a board of `size` spaces: the given specials at their sequence
/// orders, free spaces everywhere else.
pub fn board_with(store: &MemoryStore, game_id: i64, size: i64, specials: Vec<NewSpace>) {
    for order in 0..size {
        match specials.iter().find(|s| s.sequence_order == order) {
            Some(special) => store.add_space(special).unwrap(),
            None => store.add_space(&free(game_id, order)).unwrap(),
        };
    }
}
