//! SQLite adapter round-trips against an in-memory database.

use boardwalk::{
    adapters::SqliteStore,
    models::{GameStatus, NewSpace, SpaceType},
    ports::GameStore,
    Error,
};

mod common;
use common::{free, property};

fn fresh_store() -> SqliteStore {
    let store = SqliteStore::connect("sqlite::memory:").unwrap();
    store.apply_schema().unwrap();
    store
}

#[test]
fn game_session_round_trip() {
    let store = fresh_store();

    let game = store.create_game(GameStatus::Setup).unwrap();
    assert_eq!(game.status, GameStatus::Setup);
    assert_eq!(game.current_turn_player_id, None);

    store.update_game_status(game.id, GameStatus::Active).unwrap();
    let player = store.add_player(game.id, "Ada", 1500, 0).unwrap();
    store.set_current_turn(game.id, player.id).unwrap();

    let loaded = store.get_game(game.id).unwrap().unwrap();
    assert_eq!(loaded.status, GameStatus::Active);
    assert_eq!(loaded.current_turn_player_id, Some(player.id));

    assert!(store.get_game(game.id + 1000).unwrap().is_none());
}

#[test]
fn players_list_in_turn_order_and_filter_on_active() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();

    // Inserted out of order on purpose.
    let grace = store.add_player(game.id, "Grace", 1500, 1).unwrap();
    let ada = store.add_player(game.id, "Ada", 1500, 0).unwrap();

    let names: Vec<String> = store
        .list_players(game.id, false)
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Ada".to_string(), "Grace".to_string()]);

    store.update_player_active(ada.id, false).unwrap();
    let active = store.list_players(game.id, true).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, grace.id);

    store.update_player_position(grace.id, 7).unwrap();
    assert_eq!(store.get_player(grace.id).unwrap().unwrap().position, 7);
}

#[test]
fn money_adjustments_return_the_updated_row_and_append_to_the_ledger() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();
    let ada = store.add_player(game.id, "Ada", 1500, 0).unwrap();

    let after = store.adjust_money(game.id, ada.id, -300, "Test debit").unwrap();
    assert_eq!(after.money, 1200);

    let after = store.set_money(ada.id, 50).unwrap();
    assert_eq!(after.money, 50);

    let missing = store.adjust_money(game.id, ada.id + 1000, 10, "nobody");
    assert!(matches!(missing, Err(Error::PlayerNotFound { .. })));
}

#[test]
fn transfers_debit_the_payer_and_credit_the_payee() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();
    let ada = store.add_player(game.id, "Ada", 1000, 0).unwrap();
    let grace = store.add_player(game.id, "Grace", 1000, 1).unwrap();

    store
        .transfer_money(game.id, ada.id, grace.id, 125, "rent")
        .unwrap();

    assert_eq!(store.get_player(ada.id).unwrap().unwrap().money, 875);
    assert_eq!(store.get_player(grace.id).unwrap().unwrap().money, 1125);

    let bad = store.transfer_money(game.id, ada.id, grace.id + 1000, 10, "rent");
    assert!(matches!(bad, Err(Error::PlayerNotFound { .. })));
    // The failed transfer rolled back the debit half too.
    assert_eq!(store.get_player(ada.id).unwrap().unwrap().money, 875);
}

#[test]
fn adding_a_property_space_creates_its_state_row() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();

    let space = store.add_space(&property(game.id, 0, 120, 25)).unwrap();
    assert_eq!(space.kind, SpaceType::Property);

    let state = store.get_property_state(game.id, space.id).unwrap().unwrap();
    assert_eq!(state.owner_id, None);
    assert_eq!(state.improvement_count, 0);

    // Non-property spaces get no state row.
    let go = store
        .add_space(&NewSpace {
            game_id: game.id,
            sequence_order: 1,
            name: "GO".to_string(),
            kind: SpaceType::Go,
            description: None,
            purchase_cost: None,
            base_rent: None,
            event_amount: 200,
            move_target: None,
        })
        .unwrap();
    assert!(store.get_property_state(game.id, go.id).unwrap().is_none());
}

#[test]
fn spaces_list_by_sequence_order() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();

    store.add_space(&free(game.id, 2)).unwrap();
    store.add_space(&free(game.id, 0)).unwrap();
    store.add_space(&free(game.id, 1)).unwrap();

    let orders: Vec<i64> = store
        .list_spaces(game.id)
        .unwrap()
        .into_iter()
        .map(|s| s.sequence_order)
        .collect();
    assert_eq!(orders, vec![0, 1, 2]);

    assert_eq!(store.count_spaces(game.id).unwrap(), 3);
    assert_eq!(store.next_sequence_order(game.id).unwrap(), 3);

    let by_order = store.get_space_by_order(game.id, 1).unwrap().unwrap();
    let by_id = store.get_space_by_id(by_order.id).unwrap().unwrap();
    assert_eq!(by_order.id, by_id.id);
    assert!(store.get_space_by_order(game.id, 99).unwrap().is_none());
}

#[test]
fn next_sequence_order_starts_at_zero_on_an_empty_board() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();
    assert_eq!(store.next_sequence_order(game.id).unwrap(), 0);
    assert_eq!(store.count_spaces(game.id).unwrap(), 0);
}

#[test]
fn ownership_and_improvements_round_trip() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();
    let ada = store.add_player(game.id, "Ada", 1500, 0).unwrap();

    let first = store.add_space(&property(game.id, 0, 120, 25)).unwrap();
    let second = store.add_space(&property(game.id, 1, 200, 40)).unwrap();

    store
        .set_property_owner(game.id, first.id, Some(ada.id), None)
        .unwrap();
    store
        .set_property_owner(game.id, second.id, Some(ada.id), Some(2))
        .unwrap();

    let state = store.increment_improvement(game.id, first.id).unwrap();
    assert_eq!(state.improvement_count, 1);

    let owned = store.properties_by_owner(game.id, ada.id).unwrap();
    assert_eq!(owned.len(), 2);
    assert_eq!(owned[0].0.sequence_order, 0);
    assert_eq!(owned[0].1.improvement_count, 1);
    assert_eq!(owned[1].1.improvement_count, 2);

    store.release_properties_to_bank(game.id, ada.id).unwrap();
    assert!(store.properties_by_owner(game.id, ada.id).unwrap().is_empty());
    let state = store.get_property_state(game.id, second.id).unwrap().unwrap();
    assert_eq!(state.owner_id, None);
    assert_eq!(state.improvement_count, 0);
}

#[test]
fn touching_a_missing_property_state_is_an_error() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();

    let err = store.increment_improvement(game.id, 999).unwrap_err();
    assert!(matches!(err, Error::PropertyStateMissing { space_id: 999 }));

    let err = store
        .set_property_owner(game.id, 999, None, None)
        .unwrap_err();
    assert!(matches!(err, Error::PropertyStateMissing { space_id: 999 }));
}

#[test]
fn reset_turn_orders_renumbers_the_active_players_densely() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();

    let ada = store.add_player(game.id, "Ada", 1500, 0).unwrap();
    store.add_player(game.id, "Grace", 1500, 1).unwrap();
    store.add_player(game.id, "Bea", 1500, 2).unwrap();

    store.update_player_active(ada.id, false).unwrap();
    store.reset_turn_orders(game.id).unwrap();

    let orders: Vec<(String, i64)> = store
        .list_players(game.id, true)
        .unwrap()
        .into_iter()
        .map(|p| (p.name, p.turn_order))
        .collect();
    assert_eq!(
        orders,
        vec![("Grace".to_string(), 0), ("Bea".to_string(), 1)]
    );
}

#[test]
fn remove_player_deletes_the_row() {
    let store = fresh_store();
    let game = store.create_game(GameStatus::Active).unwrap();
    let ada = store.add_player(game.id, "Ada", 1500, 0).unwrap();

    store.remove_player(ada.id).unwrap();
    assert!(store.get_player(ada.id).unwrap().is_none());
}
