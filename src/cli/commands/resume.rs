//! Resume command - load an existing game and continue playing.

use anyhow::Result;
use clap::Parser;

use crate::{
    app::App,
    cli::{commands::play::play_game, output::print_banner},
};

#[derive(Parser, Debug, Clone)]
#[command(about = "Resume an existing game")]
pub struct ResumeArgs {
    /// Id of the game to load
    pub game_id: i64,
}

pub fn execute(app: &App, args: ResumeArgs) -> Result<()> {
    print_banner();
    let store = app.store();
    if store.get_game(args.game_id)?.is_none() {
        println!("Game not found.");
        return Ok(());
    }

    let mut engine = app.engine(args.game_id);
    println!("Loaded game {}.", args.game_id);
    if let Err(err) = engine.ensure_game_ready() {
        println!("Cannot start game: {err}");
        return Ok(());
    }
    play_game(&mut engine)
}
