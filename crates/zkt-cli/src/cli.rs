use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "zkt",
    about = "Zakat ledger: record collections and distributions",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ledger state snapshot
    #[arg(long, global = true, default_value = "zakat-state.json")]
    pub state: PathBuf,

    /// Contract configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write the initial seed record
    Bootstrap(BootstrapArgs),
    /// Record a new zakat collection
    Create(CreateArgs),
    /// Show a single record
    Query(QueryArgs),
    /// List every record
    List(ListArgs),
    /// Distribute a collected record to a recipient
    Distribute(DistributeArgs),
    /// Check whether a record exists
    Exists(ExistsArgs),
    /// Summarize the ledger and check its integrity
    Audit(AuditArgs),
}

#[derive(Args)]
pub struct BootstrapArgs {
    /// Collection time (RFC 3339); defaults to now
    #[arg(long)]
    pub at: Option<String>,
}

#[derive(Args)]
pub struct CreateArgs {
    pub id: String,
    /// Donor (muzakki) name
    #[arg(long)]
    pub donor: String,
    #[arg(long, allow_negative_numbers = true)]
    pub amount: f64,
    /// fitrah or maal
    #[arg(long)]
    pub kind: String,
    #[arg(long)]
    pub organization: String,
    /// Collection time (RFC 3339)
    #[arg(long)]
    pub at: String,
}

#[derive(Args)]
pub struct QueryArgs {
    pub id: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only records still awaiting distribution
    #[arg(long)]
    pub pending: bool,
}

#[derive(Args)]
pub struct DistributeArgs {
    pub id: String,
    /// Recipient (mustahik) name
    #[arg(long)]
    pub recipient: String,
    #[arg(long, allow_negative_numbers = true)]
    pub amount: f64,
    /// Distribution time (RFC 3339)
    #[arg(long)]
    pub at: String,
}

#[derive(Args)]
pub struct ExistsArgs {
    pub id: String,
}

#[derive(Args)]
pub struct AuditArgs {
    /// Exit with an error if violations are found
    #[arg(long)]
    pub strict: bool,
}
