//! # CLI
//!
//! ## Available Commands
//!
//! - `server` - Start the host bridge
//! - `status` - Show store counts
//! - `show` - Show one group's profile
//! - `remove` - Delete one group's profile
//! - `export` - Write a binary snapshot of the store
//! - `import` - Replace the store with a binary snapshot
//! - `init` - Create an empty data file

mod commands;

use crate::config::{ClanSkinConfig, DEFAULT_CONFIG_FILE};
use clanskin_core::{ClanSkinError, DataFile};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// clanskin - clan and team skin profiles
///
/// Groups save the outfit they wear once; afterwards every member who puts on
/// the same kind of item gets the saved variant.
#[derive(Parser, Debug)]
#[command(name = "clanskin")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Path to the data file (overrides the configuration)
    #[arg(short = 'D', long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the host bridge HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Show store counts
    Status,

    /// Show one group's profile
    Show {
        /// Group id (clan tag, team id or player id)
        #[arg(short, long)]
        group: String,
    },

    /// Delete one group's profile
    Remove {
        /// Group id (clan tag, team id or player id)
        #[arg(short, long)]
        group: String,
    },

    /// Write a binary snapshot of the store
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Replace the store with a binary snapshot
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Create an empty data file
    Init {
        /// Overwrite an existing data file
        #[arg(short, long)]
        force: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ClanSkinError> {
    let config = ClanSkinConfig::load(&cli.config);
    let data_file = DataFile::new(cli.data_file.unwrap_or_else(|| config.data_file.clone()));
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(&config, data_file, &host, port).await,
        Some(Commands::Status) | None => cmd_status(&data_file, json_mode),
        Some(Commands::Show { group }) => cmd_show(&data_file, json_mode, &group),
        Some(Commands::Remove { group }) => cmd_remove(&data_file, &group),
        Some(Commands::Export { output }) => cmd_export(&data_file, &output),
        Some(Commands::Import { input }) => cmd_import(&data_file, &input),
        Some(Commands::Init { force }) => cmd_init(&data_file, force),
    }
}
