//! Init command - operator-confirmed schema reset.

use anyhow::Result;

use crate::{app::App, cli::prompt::prompt_yes_no};

pub fn execute(app: &App) -> Result<()> {
    if !prompt_yes_no(
        "This drops all existing games and recreates the schema. Continue?",
        false,
    )? {
        println!("Aborted.");
        return Ok(());
    }
    app.store().apply_schema()?;
    println!("Schema applied.");
    Ok(())
}
