//! New command - interactive setup followed by the play loop.

use anyhow::{Context, Result};

use crate::{
    app::App,
    board::{DEFAULT_STARTING_MONEY, MIN_NON_PROPERTY_SPACES, MIN_PLAYERS},
    cli::{
        commands::play::play_game,
        output::print_banner,
        prompt::{prompt_int, prompt_line, prompt_yes_no},
    },
    models::{GameStatus, NewSpace, Player, SpaceType},
    ports::GameStore,
};

pub fn execute(app: &App) -> Result<()> {
    print_banner();
    let store = app.store();

    if prompt_yes_no("Reset database schema? (drops existing games)", false)? {
        store.apply_schema()?;
    }

    let starting_money = prompt_int(
        "Starting money per player",
        Some(DEFAULT_STARTING_MONEY),
        1,
    )?;

    let game = store
        .create_game(GameStatus::Setup)
        .context("could not start a game; has the schema been applied? (run `boardwalk init`)")?;

    let players = collect_players(store.as_ref(), game.id, starting_money)?;

    let mut engine = app.engine(game.id);
    if prompt_yes_no("Use default board layout?", true)? {
        engine.load_default_board()?;
    } else {
        manual_board_setup(store.as_ref(), game.id)?;
    }

    store.update_game_status(game.id, GameStatus::Active)?;
    if let Some(first) = players.first() {
        store.set_current_turn(game.id, first.id)?;
    }
    println!("Game {} ready. Starting...", game.id);

    play_game(&mut engine)
}

/// Collect at least two uniquely named players; a blank name finishes.
fn collect_players(store: &dyn GameStore, game_id: i64, starting_money: i64) -> Result<Vec<Player>> {
    let mut players: Vec<Player> = Vec::new();
    println!("Enter player names (minimum {MIN_PLAYERS}). Leave blank to finish.");
    loop {
        let name = prompt_line(&format!("Player {} name: ", players.len() + 1))?;
        if name.is_empty() {
            if players.len() >= MIN_PLAYERS {
                break;
            }
            println!("At least two players are required.");
            continue;
        }
        if players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(&name))
        {
            println!("Name already used. Choose a unique player name.");
            continue;
        }
        let turn_order = players.len() as i64;
        players.push(store.add_player(game_id, &name, starting_money, turn_order)?);
    }
    Ok(players)
}

/// Interactive board builder; requires at least one space overall and four
/// non-property spaces before the board is accepted.
fn manual_board_setup(store: &dyn GameStore, game_id: i64) -> Result<()> {
    let mut non_property_count = 0;
    loop {
        println!("\nBoard Builder:");
        println!("1. Add property");
        println!("2. Add non-property space");
        println!("3. Finish");
        match prompt_line("Select an option: ")?.as_str() {
            "1" => {
                add_property_space(store, game_id)?;
            }
            "2" => {
                add_non_property_space(store, game_id)?;
                non_property_count += 1;
            }
            "3" => {
                if store.count_spaces(game_id)? == 0 {
                    println!("You need at least one space before finishing.");
                    continue;
                }
                if non_property_count < MIN_NON_PROPERTY_SPACES {
                    println!(
                        "Add at least {MIN_NON_PROPERTY_SPACES} non-property spaces to satisfy requirements."
                    );
                    continue;
                }
                return Ok(());
            }
            _ => println!("Invalid option."),
        }
    }
}

fn add_property_space(store: &dyn GameStore, game_id: i64) -> Result<()> {
    let sequence = store.next_sequence_order(game_id)?;
    let mut name = prompt_line("Property name: ")?;
    if name.is_empty() {
        name = format!("Property {sequence}");
    }
    let cost = prompt_int("Purchase cost", Some(100), 1)?;
    let rent = prompt_int("Base rent", Some(20), 1)?;
    let mut description = prompt_line("Short description: ")?;
    if description.is_empty() {
        description = "User created property.".to_string();
    }
    let space = store.add_space(&NewSpace {
        game_id,
        sequence_order: sequence,
        name,
        kind: SpaceType::Property,
        description: Some(description),
        purchase_cost: Some(cost),
        base_rent: Some(rent),
        event_amount: 0,
        move_target: None,
    })?;
    println!("Added property '{}' at position {sequence}.", space.name);
    Ok(())
}

fn select_event_type() -> Result<SpaceType> {
    println!("Choose event type:");
    for (index, kind) in SpaceType::EVENT_TYPES.iter().enumerate() {
        println!("{}. {kind}", index + 1);
    }
    loop {
        let choice = prompt_line("Type number: ")?;
        match choice.parse::<usize>() {
            Ok(n) if (1..=SpaceType::EVENT_TYPES.len()).contains(&n) => {
                return Ok(SpaceType::EVENT_TYPES[n - 1]);
            }
            _ => println!("Invalid selection."),
        }
    }
}

fn add_non_property_space(store: &dyn GameStore, game_id: i64) -> Result<()> {
    let sequence = store.next_sequence_order(game_id)?;
    let kind = select_event_type()?;
    let mut name = prompt_line("Space name: ")?;
    if name.is_empty() {
        name = format!("{kind} {sequence}");
    }
    let description = prompt_line("Short description: ")?;
    let event_amount = prompt_int(
        "Event payout (negative for fees, 0 for default effect)",
        Some(0),
        i64::MIN,
    )?;
    let move_target = if kind == SpaceType::Jail {
        Some(prompt_int(
            "Move target index (where Jail is on the board)",
            Some(sequence),
            0,
        )?)
    } else {
        None
    };
    let space = store.add_space(&NewSpace {
        game_id,
        sequence_order: sequence,
        name,
        kind,
        description: if description.is_empty() {
            None
        } else {
            Some(description)
        },
        purchase_cost: None,
        base_rent: None,
        event_amount,
        move_target,
    })?;
    println!(
        "Added {} space '{}' at position {sequence}.",
        space.kind, space.name
    );
    Ok(())
}
