//! CLI entry point for skillbridge.
//!
//! This binary provides the `skillbridge` command: an interactive setup
//! flow that connects tool-platform integrations to the local skill store,
//! plus `logout` and `status` subcommands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use skillbridge_catalog::Endpoints;
use skillbridge_store::SessionStore;

mod setup;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// skillbridge — connect tool-platform integrations to your agent's skills.
#[derive(Parser)]
#[command(
    name = "skillbridge",
    version,
    about = "Connect tool-platform integrations to your agent's skill store",
    long_about = "Fetches the integration catalog from the tool platform, walks you \
                  through enabling and authenticating integrations, and installs one \
                  generated skill per action into the local skill database."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive integration setup (the default).
    Setup,

    /// Clear the stored session credential.
    Logout,

    /// Show session and skill-database status.
    Status,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Setup) {
        Commands::Setup => cmd_setup().await,
        Commands::Logout => cmd_logout(),
        Commands::Status => cmd_status(),
    };

    // Every domain error surfaces here as one user-facing line.
    if let Err(err) = result {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Subcommand: setup
// ---------------------------------------------------------------------------

async fn cmd_setup() -> Result<()> {
    init_tracing("warn");

    let endpoints = Endpoints::resolve();
    setup::run_setup(endpoints).await
}

// ---------------------------------------------------------------------------
// Subcommand: logout
// ---------------------------------------------------------------------------

fn cmd_logout() -> Result<()> {
    init_tracing("warn");

    let store = SessionStore::open_default().context("failed to locate session file")?;
    let cleared = store.clear_credential().context("failed to clear session")?;

    if cleared {
        println!("{} Logged out.", "✔".green());
    } else {
        println!("No stored session to log out from.");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: status
// ---------------------------------------------------------------------------

fn cmd_status() -> Result<()> {
    init_tracing("warn");

    let endpoints = Endpoints::resolve();
    println!();
    println!("  skillbridge status");
    println!("  ------------------");
    println!("  API endpoint:   {}", endpoints.api_base_url);

    match SessionStore::open_default() {
        Ok(store) => {
            match store.load()? {
                Some(session) if session.user_id.is_some() => {
                    println!("  Session:        ACTIVE ({})", store.path().display());
                }
                Some(_) => {
                    println!("  Session:        LOGGED OUT (run `skillbridge setup`)");
                }
                None => {
                    println!("  Session:        NOT SET UP (run `skillbridge setup`)");
                }
            }

            let db_path = setup::skill_db_path(&store);
            if db_path.exists() {
                println!("  Skill database: OK ({})", db_path.display());
            } else {
                println!("  Skill database: NOT INITIALIZED (run `skillbridge setup`)");
            }
        }
        Err(err) => println!("  Session:        UNAVAILABLE ({err})"),
    }

    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
