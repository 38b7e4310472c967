//! Output formatting for the CLI.

use crate::{models::SpaceType, ports::GameStore, Result};

/// Print the startup banner.
pub fn print_banner() {
    println!("{}", "=".repeat(60));
    println!("BOARDWALK - Terminal Edition");
    println!("{}", "=".repeat(60));
}

/// Print a section header.
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print the rules summary.
pub fn print_rules() {
    println!("--- RULES SUMMARY ---");
    println!("1) Roll two dice and move clockwise.");
    println!("2) Unowned property: you may buy it.");
    println!("3) Owned property: pay rent to the owner.");
    println!("4) Your property: you may improve or sell it when you land on it.");
    println!("5) Special spaces (tax/bonus/jail/chance) trigger automatic events.");
    println!("6) Passing GO pays $200. Hitting $0 forces selling property back to the bank.");
    println!("7) A player with $0 and no property is eliminated. Last player standing wins.");
}

/// Render the players and the board, with ownership per property.
pub fn show_status(store: &dyn GameStore, game_id: i64) -> Result<()> {
    let current_id = store
        .get_game(game_id)?
        .and_then(|game| game.current_turn_player_id);

    println!("\nPlayers:");
    for player in store.list_players(game_id, false)? {
        let status = if player.is_active { "ACTIVE" } else { "OUT" };
        let turn_marker = if Some(player.id) == current_id {
            " (current turn)"
        } else {
            ""
        };
        println!(
            "- {}: ${} | Pos {} | {status}{turn_marker}",
            player.name, player.money, player.position
        );
    }

    println!("\nBoard:");
    for space in store.list_spaces(game_id)? {
        let mut ownership = String::new();
        if space.kind == SpaceType::Property {
            let state = store.get_property_state(game_id, space.id)?;
            let owner_name = match state.as_ref().and_then(|ps| ps.owner_id) {
                Some(owner_id) => store
                    .get_player(owner_id)?
                    .map(|owner| owner.name)
                    .unwrap_or_else(|| "Bank".to_string()),
                None => "Bank".to_string(),
            };
            let improvements = state.map(|ps| ps.improvement_count).unwrap_or(0);
            ownership = format!(" | Owner: {owner_name} | Improves: {improvements}");
        }
        println!(
            "{}. {} ({}){ownership}",
            space.sequence_order, space.name, space.kind
        );
    }
    println!();
    Ok(())
}
