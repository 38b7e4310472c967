//! Turn resolution: movement, passed-GO detection, and every event branch.

use boardwalk::{
    adapters::{MemoryStore, ScriptedDice},
    models::SpaceType,
    ports::GameStore,
    Error,
};

mod common;
use common::{active_game, board_with, engine_with, event, jail, player_named, property};

#[test]
fn movement_wraps_and_strict_decrease_pays_the_go_bonus() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![]);

    let mut ada = player_named(&store, game_id, "Ada");
    store.update_player_position(ada.id, 5).unwrap();
    ada.position = 5;

    // 5 + 9 = 14, mod 12 = 2; 2 < 5 so GO was passed exactly once.
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(4, 5)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.dice, (4, 5));
    assert_eq!(outcome.player.position, 2);
    assert_eq!(outcome.player.money, 1200);
    assert!(outcome.messages.iter().any(|m| m.contains("passing GO")));
}

#[test]
fn no_bonus_without_wraparound() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![]);

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.position, 3);
    assert_eq!(outcome.player.money, 1000);
}

#[test]
fn wrapping_back_to_the_same_position_is_not_a_pass() {
    // Distance equal to the board size lands on the starting space; the
    // position does not strictly decrease, so no passive bonus is paid.
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![]);

    let ada = player_named(&store, game_id, "Ada");
    assert_eq!(ada.position, 0);

    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(6, 6)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.position, 0);
    assert_eq!(outcome.player.money, 1000);
}

#[test]
fn landing_on_go_after_wrapping_pays_twice() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(
        &store,
        game_id,
        12,
        vec![event(game_id, 0, SpaceType::Go, 200)],
    );

    let mut ada = player_named(&store, game_id, "Ada");
    store.update_player_position(ada.id, 5).unwrap();
    ada.position = 5;

    // 5 + 7 = 12, mod 12 = 0: wraps past GO and lands on it.
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(3, 4)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.position, 0);
    assert_eq!(outcome.player.money, 1400);
}

#[test]
fn tax_space_debits_its_amount() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(
        &store,
        game_id,
        12,
        vec![event(game_id, 3, SpaceType::Tax, -150)],
    );

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.money, 850);
}

#[test]
fn tax_space_with_zero_amount_falls_back_to_the_default() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(
        &store,
        game_id,
        12,
        vec![event(game_id, 3, SpaceType::Tax, 0)],
    );

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.money, 850);
}

#[test]
fn bonus_space_credits_the_default_when_zero() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(
        &store,
        game_id,
        12,
        vec![event(game_id, 3, SpaceType::Bonus, 0)],
    );

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.money, 1150);
}

#[test]
fn penalty_space_debits_the_default_when_zero() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(
        &store,
        game_id,
        12,
        vec![event(game_id, 3, SpaceType::Penalty, 0)],
    );

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.money, 900);
}

#[test]
fn jail_space_redirects_and_fines() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![jail(game_id, 3, 0, Some(8))]);

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    // The landing write is overwritten by the redirect.
    assert_eq!(outcome.player.position, 8);
    assert_eq!(outcome.player.money, 950);
}

#[test]
fn jail_space_without_target_leaves_the_player_in_place() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![jail(game_id, 3, -75, None)]);

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.position, 3);
    assert_eq!(outcome.player.money, 925);
}

#[test]
fn chance_space_applies_the_drawn_amount() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(
        &store,
        game_id,
        12,
        vec![event(game_id, 3, SpaceType::Chance, 0)],
    );

    let ada = player_named(&store, game_id, "Ada");
    let mut dice = ScriptedDice::with_rolls([(1, 2)]);
    dice.push_draw(-50);
    let mut engine = engine_with(&store, game_id, dice);
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert_eq!(outcome.player.money, 950);
    assert!(outcome.messages.iter().any(|m| m.contains("lose $50")));
}

#[test]
fn unowned_property_flags_the_buy_decision_without_money_movement() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![property(game_id, 3, 120, 25)]);

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert!(outcome.needs_buy_decision);
    assert!(!outcome.landed_on_own_property);
    assert_eq!(outcome.rent_paid, 0);
    assert_eq!(outcome.player.money, 1000);
}

#[test]
fn own_property_has_no_effect() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![property(game_id, 3, 120, 25)]);

    let ada = player_named(&store, game_id, "Ada");
    let space = store.get_space_by_order(game_id, 3).unwrap().unwrap();
    store
        .set_property_owner(game_id, space.id, Some(ada.id), None)
        .unwrap();

    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    assert!(outcome.landed_on_own_property);
    assert!(!outcome.needs_buy_decision);
    assert_eq!(outcome.player.money, 1000);
}

#[test]
fn rent_includes_the_improvement_bonus() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![property(game_id, 3, 120, 25)]);

    let ada = player_named(&store, game_id, "Ada");
    let grace = player_named(&store, game_id, "Grace");
    let space = store.get_space_by_order(game_id, 3).unwrap().unwrap();
    store
        .set_property_owner(game_id, space.id, Some(grace.id), Some(2))
        .unwrap();

    let mut engine = engine_with(&store, game_id, ScriptedDice::with_rolls([(1, 2)]));
    let outcome = engine.resolve_turn(&ada).unwrap();

    // base 25 + 2 improvements * 50
    assert_eq!(outcome.rent_paid, 125);
    assert_eq!(outcome.player.money, 875);
    assert_eq!(player_named(&store, game_id, "Grace").money, 1125);
}

#[test]
fn empty_board_is_a_setup_error() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);

    let ada = player_named(&store, game_id, "Ada");
    let mut engine = engine_with(&store, game_id, ScriptedDice::new());
    let err = engine.resolve_turn(&ada).unwrap_err();
    assert!(matches!(err, Error::BoardEmpty));

    // No mutation happened.
    assert_eq!(player_named(&store, game_id, "Ada").money, 1000);
    assert_eq!(player_named(&store, game_id, "Ada").position, 0);
}

#[test]
fn no_active_players_is_a_setup_error() {
    let store = MemoryStore::new();
    let game_id = active_game(&store, &["Ada", "Grace"], 1000);
    board_with(&store, game_id, 12, vec![]);

    for player in store.list_players(game_id, false).unwrap() {
        store.update_player_active(player.id, false).unwrap();
    }

    let engine = engine_with(&store, game_id, ScriptedDice::new());
    assert!(matches!(
        engine.ensure_game_ready().unwrap_err(),
        Error::NoActivePlayers
    ));
}
