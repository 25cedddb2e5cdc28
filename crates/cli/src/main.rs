//! Makcik CLI - Order from Makcik Kitchen in a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Start an interactive ordering session with the built-in menu
//! makcik order
//!
//! # Use a custom menu and emit every view as a JSON line
//! makcik order --menu menu.yaml --json
//!
//! # Print the menu
//! makcik menu
//!
//! # Check a single registration field
//! makcik validate phone 09171234567
//! ```
//!
//! # Commands
//!
//! - `order` - Interactive ordering session (type `help` inside for the command list)
//! - `menu` - Print the menu
//! - `validate` - Run the registration validator on one value
//!
//! Logs go to stderr and follow `RUST_LOG`; stdout carries only the rendered
//! page.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod input;
mod terminal;

#[derive(Parser)]
#[command(name = "makcik")]
#[command(author, version, about = "Makcik Kitchen ordering")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive ordering session
    Order {
        /// Menu file (YAML); defaults to the built-in menu
        #[arg(short, long)]
        menu: Option<PathBuf>,

        /// Render each view as a JSON line instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the menu
    Menu {
        /// Menu file (YAML); defaults to the built-in menu
        #[arg(short, long)]
        menu: Option<PathBuf>,
    },
    /// Validate one registration field value
    Validate {
        /// Field name (`first_name`, `last_name`, `email`, `phone`, `address`)
        field: String,

        /// Value to check
        value: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "makcik=info,makcik_cli=info,makcik_ordering=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Order { menu, json } => commands::order::run(menu.as_deref(), json).await?,
        Commands::Menu { menu } => commands::menu::print(menu.as_deref()).await?,
        Commands::Validate { field, value } => commands::validate::check(&field, &value)?,
    }
    Ok(())
}
