//! Stemlifectl - CLI client for the Life-As-STEM game
//!
//! Plays the quiz/life-simulation either against a game server or from
//! the built-in question bank.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Instant;
use stemlife_common::config::ClientConfig;
use stemlife_common::{GameError, PlayerState};
use stemlifectl::backend::GameBackend;
use stemlifectl::client::HttpGameClient;
use stemlifectl::local::LocalGame;
use stemlifectl::session::Session;
use stemlifectl::{commands, errors, logging};
use tracing::Level;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "stemlifectl")]
#[command(about = "Life As STEM - educational quiz and life-simulation client", long_about = None)]
#[command(version)]
struct Cli {
    /// Game server base URL (overrides configuration)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Play from the built-in question bank instead of a server
    #[arg(long, global = true)]
    local: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively until the content runs out
    Play,
    /// Fetch and show the current life event
    Event,
    /// Answer the current event with the numbered choice
    Choose { number: usize },
    /// Show the current player profile
    Stats,
    /// Show the STEM recommendation (age 18 and up)
    Recommend,
    /// Reset the game and start a new life
    Reset,
    /// Print the built-in question bank
    Questions,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Play => "play",
            Commands::Event => "event",
            Commands::Choose { .. } => "choose",
            Commands::Stats => "stats",
            Commands::Recommend => "recommend",
            Commands::Reset => "reset",
            Commands::Questions => "questions",
        }
    }
}

async fn dispatch<B: GameBackend>(command: Commands, mut session: Session<B>) -> Result<()> {
    match command {
        Commands::Play => commands::play(&mut session).await,
        Commands::Event => commands::event(&mut session).await,
        Commands::Choose { number } => commands::choose(&mut session, number).await,
        Commands::Stats => commands::stats(&mut session).await,
        Commands::Recommend => commands::recommend(&mut session).await,
        Commands::Reset => commands::reset(&mut session).await,
        Commands::Questions => commands::questions(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = ClientConfig::load();
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }

    let session_id = Uuid::new_v4();
    let started = Instant::now();
    let command_name = cli.command.name();

    let result = if cli.local {
        let session = Session::new(
            LocalGame::new(),
            PlayerState::legacy_start(),
            config.effective_advance_delay(),
        );
        dispatch(cli.command, session).await
    } else {
        match HttpGameClient::new(&config) {
            Ok(client) => {
                let session = Session::new(
                    client,
                    PlayerState::default(),
                    config.effective_advance_delay(),
                );
                dispatch(cli.command, session).await
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Err(e.into())
            }
        }
    };

    let detail = result.as_ref().err().map(|e| format!("{e:#}"));
    logging::LogEntry::new(
        session_id,
        command_name,
        result.is_ok(),
        detail,
        started.elapsed().as_millis() as u64,
    )
    .append();

    if let Err(err) = result {
        let code = err
            .downcast_ref::<GameError>()
            .map(errors::exit_code)
            .unwrap_or(errors::EXIT_GENERAL_ERROR);
        std::process::exit(code);
    }
    Ok(())
}
