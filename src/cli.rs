use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "avstandards",
    version,
    about = "Check AV room designs against organizational standards"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a design context against a rule set
    Check {
        /// Rule file (.yaml, .yml or .json); defaults to standards.rules_path
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Design context file (.json, .yaml or .yml)
        #[arg(long)]
        context: PathBuf,

        /// Report format; defaults to output.format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// List active rules in evaluation order
    List {
        /// Rule file (.yaml, .yml or .json); defaults to standards.rules_path
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
    /// Evaluate a single comparison expression
    Eval {
        /// Expression such as "display.size >= 75"
        expression: String,

        /// Design context file (.json, .yaml or .yml)
        #[arg(long)]
        context: PathBuf,
    },
}
