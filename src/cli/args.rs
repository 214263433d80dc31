//! Command-line argument tree

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::cli::commands::access::AccessCommands;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::emp::EmpCommands;
use crate::cli::commands::fin::FinCommands;
use crate::cli::commands::init::InitArgs;
use crate::cli::commands::prod::ProdCommands;
use crate::cli::commands::stock::StockCommands;
use crate::cli::commands::users::UserCommands;

#[derive(Debug, Parser)]
#[command(name = "carangos")]
#[command(author, version, about = "Production, inventory, finance and HR records for Carangos S/A")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted by every command
#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Data directory holding the JSON record files
    #[arg(long, global = true, env = "CARANGOS_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Username to log in with
    #[arg(long, global = true, env = "CARANGOS_USER")]
    pub user: Option<String>,

    /// Password to log in with
    #[arg(long, global = true, env = "CARANGOS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub format: OutputFormat,

    /// Verbose logging to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tables for listings, labelled text for single records
    Auto,
    Table,
    Json,
    Csv,
    /// Keys only, one per line
    Id,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create (or top up) a data directory with its seed accounts
    Init(InitArgs),

    /// Show the logged-in account and the modules it reaches
    Whoami,

    /// Login account management
    #[command(subcommand)]
    Users(UserCommands),

    /// Inspect the role allow-lists
    #[command(subcommand)]
    Access(AccessCommands),

    /// Human resources: employees and payroll
    #[command(subcommand)]
    Emp(EmpCommands),

    /// Production records and reports
    #[command(subcommand)]
    Prod(ProdCommands),

    /// Inventory: products and orders
    #[command(subcommand)]
    Stock(StockCommands),

    /// Finance: expenses and plant costs
    #[command(subcommand)]
    Fin(FinCommands),

    /// Plant overview
    Dashboard,

    /// Interactive terminal menu
    Menu,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
