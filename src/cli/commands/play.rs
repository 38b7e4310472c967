//! The interactive play loop shared by `new` and `resume`.

use std::sync::Arc;

use anyhow::{bail, Result};

use crate::{
    board::IMPROVEMENT_COST,
    cli::{output::show_status, prompt::prompt_line, prompt::prompt_yes_no},
    engine::GameEngine,
    models::{BoardSpace, Player},
    ports::GameStore,
};

/// Resolve the session's turn pointer, fixing it up to the first active
/// player when unset or dangling.
pub fn ensure_turn_pointer(
    store: &Arc<dyn GameStore + Send + Sync>,
    game_id: i64,
) -> Result<Player> {
    if let Some(game) = store.get_game(game_id)? {
        if let Some(player_id) = game.current_turn_player_id {
            if let Some(player) = store.get_player(player_id)? {
                return Ok(player);
            }
        }
    }
    let players = store.list_players(game_id, true)?;
    match players.into_iter().next() {
        Some(first) => {
            store.set_current_turn(game_id, first.id)?;
            Ok(first)
        }
        None => bail!("No active players available."),
    }
}

/// Drive the blocking roll/status/quit loop until the game ends or the
/// operator quits. Turns are never interrupted mid-resolution.
pub fn play_game(engine: &mut GameEngine) -> Result<()> {
    let store = Arc::clone(engine.store());
    let game_id = engine.game_id();
    let mut current = ensure_turn_pointer(&store, game_id)?;

    loop {
        println!("\n--- {}'s Turn ---", current.name);
        let cmd = prompt_line(&format!(
            "[R]oll | [S]tatus | [Q]uit to main menu (You have ${}): ",
            current.money
        ))?
        .to_lowercase();

        match cmd.as_str() {
            "q" | "quit" => break,
            "s" | "status" => {
                show_status(store.as_ref(), game_id)?;
                continue;
            }
            "" | "r" | "roll" => {}
            _ => {
                println!("Invalid command.");
                continue;
            }
        }

        let result = engine.resolve_turn(&current)?;
        current = result.player.clone();
        for msg in &result.messages {
            println!("{msg}");
        }

        if result.space.is_property() {
            let state = store.get_property_state(game_id, result.space.id)?;
            let owner = match state.as_ref().and_then(|ps| ps.owner_id) {
                Some(owner_id) => store.get_player(owner_id)?,
                None => None,
            };
            match owner {
                Some(owner) if owner.id != current.id => {
                    println!(
                        "Landed on {}'s property. Rent paid: ${}.",
                        owner.name, result.rent_paid
                    );
                }
                None => println!("This property is unowned."),
                _ => {}
            }
            if current.is_active {
                handle_property_decision(engine, &current, &result.space, result.needs_buy_decision)?;
            }
        }

        for name in &result.eliminated {
            println!("{name} has been eliminated.");
        }
        if !result.eliminated.is_empty() && !current.is_active {
            println!("{} is out of the game.", current.name);
        }

        if let Some(winner) = &result.winner {
            println!("{winner} wins the game!");
            break;
        }

        match engine.next_turn()? {
            Some(next) => current = next,
            None => {
                println!("No active players remaining.");
                break;
            }
        }
    }
    Ok(())
}

/// Offer the buy prompt on an unowned property, or the improve/sell menu on
/// the player's own.
fn handle_property_decision(
    engine: &GameEngine,
    player: &Player,
    space: &BoardSpace,
    needs_buy: bool,
) -> Result<()> {
    let store = engine.store();
    if needs_buy {
        let cost = space.purchase_cost.unwrap_or(0);
        if prompt_yes_no(
            &format!("Do you want to buy {} for ${cost}?", space.name),
            true,
        )? {
            if engine.buy_property(player, space)? {
                println!("Purchased {}.", space.name);
            } else {
                println!("Unable to purchase (insufficient funds or already owned).");
            }
        }
        return Ok(());
    }

    let state = store.get_property_state(engine.game_id(), space.id)?;
    if !state.map(|ps| ps.is_owned_by(player.id)).unwrap_or(false) {
        return Ok(());
    }

    println!("You own this property.");
    println!("1. Improve property");
    println!("2. Sell property to bank");
    println!("3. Skip");
    match prompt_line("Select an option: ")?.as_str() {
        "1" => {
            if engine.improve_property(player, space)? {
                println!("Improved {} for ${IMPROVEMENT_COST}.", space.name);
            } else {
                println!("Cannot improve (not enough funds?).");
            }
        }
        "2" => {
            let sale = engine.sell_property(player, space)?;
            println!("Sold {} for ${sale}.", space.name);
        }
        _ => {}
    }
    Ok(())
}
