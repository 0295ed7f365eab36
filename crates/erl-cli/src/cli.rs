use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "erl",
    about = "Entropy Receipt Ledger: tamper-evident session receipts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

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
    /// Run a scripted verification session and record its receipts
    Demo(DemoArgs),
    /// Verify the receipt chain of an exported ledger
    Verify(VerifyArgs),
    /// Show statistics for an exported ledger
    Stats(StatsArgs),
}

#[derive(Args)]
pub struct DemoArgs {
    /// Ledger configuration (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the line-delimited export here
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Seed for the entropy score generator
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct VerifyArgs {
    pub file: PathBuf,
    /// Check chain links only, skipping payload rehashing
    #[arg(long)]
    pub links_only: bool,
    /// Ledger configuration (TOML), for the hash algorithms
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct StatsArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub config: Option<PathBuf>,
}
