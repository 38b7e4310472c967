//! Status command - render the players and board of a game.

use anyhow::Result;
use clap::Parser;

use crate::{app::App, cli::output::show_status};

#[derive(Parser, Debug, Clone)]
#[command(about = "Show players and board for a game")]
pub struct StatusArgs {
    /// Id of the game to inspect
    pub game_id: i64,
}

pub fn execute(app: &App, args: StatusArgs) -> Result<()> {
    let store = app.store();
    if store.get_game(args.game_id)?.is_none() {
        println!("Game not found.");
        return Ok(());
    }
    show_status(store.as_ref(), args.game_id)?;
    Ok(())
}
