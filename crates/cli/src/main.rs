//! Coinhall CLI - Offline operator tools for the data file.
//!
//! # Usage
//!
//! ```bash
//! # Summarize the data file
//! coinhall-cli inspect
//!
//! # Credit 500 coins (use a negative amount to debit)
//! coinhall-cli adjust -e player@example.com -a 500
//!
//! # Empty the activity log
//! coinhall-cli --data-file /srv/coinhall/database.json clear-logs
//! ```
//!
//! # Commands
//!
//! - `inspect` - Collection counts, top balances, unanswered reports
//! - `adjust` - Admin balance adjustment, saved to the file
//! - `clear-logs` - Empty the activity log
//!
//! Stop the server first: it keeps the whole file in memory and its next
//! save overwrites changes made here.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "coinhall-cli")]
#[command(author, version, about = "Coinhall operator tools")]
struct Cli {
    /// Path of the JSON data file
    #[arg(long, global = true, env = "COINHALL_DATA_FILE", default_value = "database.json")]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print collection counts, top balances and unanswered reports
    Inspect {
        /// Number of balances to list
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },
    /// Credit or debit a user's balance
    Adjust {
        /// User email
        #[arg(short, long)]
        email: String,

        /// Signed amount of coins
        #[arg(short, long, allow_hyphen_values = true)]
        amount: i64,
    },
    /// Empty the activity log
    ClearLogs,
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Inspect { top } => commands::inspect::run(&cli.data_file, top)?,
        Commands::Adjust { email, amount } => {
            commands::adjust::run(&cli.data_file, &email, amount)?;
        }
        Commands::ClearLogs => commands::logs::clear(&cli.data_file)?,
    }
    Ok(())
}
