//! Insura CLI - local store management and premium quotes.
//!
//! # Usage
//!
//! ```bash
//! # Seed the demo account into ./data/local_storage.json
//! insura-cli seed
//!
//! # Inspect the store
//! insura-cli users list
//! insura-cli --data-dir /srv/insura history list
//!
//! # Compute premiums without touching the store
//! insura-cli quote car --brand Toyota --model Avanza --year 2020 --price 150000000
//! insura-cli quote health --dob 1990-04-01 --smoker
//! insura-cli quote life --dob 1980-01-01 --coverage 100000000
//! ```
//!
//! # Commands
//!
//! - `seed` - Seed the demo user
//! - `users list` - Print registered users
//! - `history list` - Print paid invoices, newest first
//! - `quote car|health|life` - Run a premium calculator
//!
//! # Environment Variables
//!
//! - `INSURA_DATA_DIR` - Data directory used when `--data-dir` is not given

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::quote::{CarArgs, HealthArgs, LifeArgs};

#[derive(Parser)]
#[command(name = "insura-cli")]
#[command(author, version, about = "Insura CLI tools")]
struct Cli {
    /// Directory holding `local_storage.json` (default: `INSURA_DATA_DIR` or ./data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the demo user (demo@insura.com)
    Seed,
    /// Inspect registered users
    Users {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Inspect the purchase history
    History {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Compute a premium with the storefront calculators
    Quote {
        #[command(subcommand)]
        product: QuoteProduct,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// List every entry
    List,
}

#[derive(Subcommand)]
enum QuoteProduct {
    /// Annual car premium
    Car(CarArgs),
    /// Annual health premium
    Health(HealthArgs),
    /// Monthly life premium
    Life(LifeArgs),
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::store::seed(&resolve_data_dir(cli.data_dir))?,
        Commands::Users {
            action: ListAction::List,
        } => commands::store::list_users(&resolve_data_dir(cli.data_dir))?,
        Commands::History {
            action: ListAction::List,
        } => commands::store::list_history(&resolve_data_dir(cli.data_dir))?,
        Commands::Quote { product } => match product {
            QuoteProduct::Car(args) => commands::quote::car(&args)?,
            QuoteProduct::Health(args) => commands::quote::health(&args)?,
            QuoteProduct::Life(args) => commands::quote::life(&args)?,
        },
    }
    Ok(())
}

/// `--data-dir`, then `INSURA_DATA_DIR` (from the environment or `.env`),
/// then `./data`.
fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| {
        dotenvy::dotenv().ok();
        std::env::var("INSURA_DATA_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from("./data"), PathBuf::from)
    })
}
