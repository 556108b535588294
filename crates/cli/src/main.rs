//! M5 CLI - catalog and data management from the terminal.
//!
//! Works directly on the showcase data directory, so it can be used to seed
//! a fresh installation, review submissions or move data between hosts.
//!
//! # Usage
//!
//! ```bash
//! # List tech products mentioning "display"
//! m5 products list --category tech --search display
//!
//! # Review submissions
//! m5 submissions list
//! m5 submissions approve 1736420000000
//! m5 submissions reject 1736420000000 --yes
//!
//! # Data
//! m5 seed
//! m5 export --output backup.json
//! m5 import backup.json
//! m5 password set 'n3w-pa55'
//! ```
//!
//! The data directory defaults to `SHOWCASE_DATA_DIR` (or `data`) and can be
//! overridden with `--data-dir`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use m5_core::Category;
use m5_showcase::config::ShowcaseConfig;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "m5")]
#[command(author, version, about = "M5 showcase CLI tools")]
struct Cli {
    /// Data directory (default: `SHOWCASE_DATA_DIR`, else `data`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse published products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Review visitor submissions
    Submissions {
        #[command(subcommand)]
        action: SubmissionAction,
    },
    /// Write the current data, including the sample catalog on a fresh install
    Seed,
    /// Export products, submissions and settings as JSON
    Export {
        /// Output file (default: `m5-data-YYYY-MM-DD.json`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace products, submissions and settings from an export file
    Import {
        /// Export file to read
        path: PathBuf,
    },
    /// Manage the admin password
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, optionally filtered
    List {
        /// Only products in this category (`tech`, `innovation`, `design`)
        #[arg(short, long)]
        category: Option<Category>,

        /// Case-insensitive text to find in name, description or creator
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[derive(Subcommand)]
enum SubmissionAction {
    /// List pending submissions
    List,
    /// Publish a submission as a product
    Approve {
        /// Submission ID
        id: String,
    },
    /// Delete a submission
    Reject {
        /// Submission ID
        id: String,

        /// Confirm the rejection; it cannot be undone
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum PasswordAction {
    /// Replace the admin password
    Set {
        /// New password
        password: String,
    },
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = ShowcaseConfig::from_env()?;
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);
    let mut showcase = commands::open(&data_dir, config.storage_quota)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List { category, search } => {
                commands::products::list(&showcase, category, search.as_deref(), &mut stdout)?;
            }
        },
        Commands::Submissions { action } => match action {
            SubmissionAction::List => commands::submissions::list(&showcase, &mut stdout)?,
            SubmissionAction::Approve { id } => commands::submissions::approve(&mut showcase, &id)?,
            SubmissionAction::Reject { id, yes } => {
                commands::submissions::reject(&mut showcase, &id, yes)?;
            }
        },
        Commands::Seed => commands::data::seed(&mut showcase)?,
        Commands::Export { output } => {
            commands::data::export(&showcase, output.as_deref())?;
        }
        Commands::Import { path } => commands::data::import(&mut showcase, &path)?,
        Commands::Password { action } => match action {
            PasswordAction::Set { password } => {
                commands::password::set(&mut showcase, password)?;
            }
        },
    }
    Ok(())
}
