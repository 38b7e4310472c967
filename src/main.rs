use anyhow::{anyhow, Context, Result};
use boardwalk::{
    app::{App, StoreConfig},
    cli::commands,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "boardwalk",
    version,
    about = "Terminal Monopoly-style board game backed by SQLite"
)]
struct Cli {
    /// sqlx connection string, e.g. sqlite://boardwalk.db
    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Fixed dice seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new game
    New,
    /// Resume an existing game
    Resume(commands::resume::ResumeArgs),
    /// Show players and board for a game
    Status(commands::status::StatusArgs),
    /// Apply (reset) the database schema
    Init,
    /// Print the rules summary
    Rules,
}

fn connect(cli: &Cli) -> Result<App> {
    let url = cli
        .database_url
        .clone()
        .ok_or_else(|| anyhow!("database URL is required; pass --database-url or set DATABASE_URL"))?;
    let mut app =
        App::connect(&StoreConfig::new(url)).context("failed to open the game database")?;
    if let Some(seed) = cli.seed {
        app = app.with_seed(seed);
    }
    Ok(app)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::New => commands::new::execute(&connect(&cli)?),
        Command::Resume(ref args) => commands::resume::execute(&connect(&cli)?, args.clone()),
        Command::Status(ref args) => commands::status::execute(&connect(&cli)?, args.clone()),
        Command::Init => commands::init::execute(&connect(&cli)?),
        Command::Rules => {
            commands::rules::execute();
            Ok(())
        }
    }
}
