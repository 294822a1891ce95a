//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pcfg")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Configure products, decode product codes and verify catalog data")]
pub(crate) struct Cli {
    /// Configuration file; `configurator.{toml,yaml,json}` is used when present
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Extra JSON catalog document to register (repeatable)
    #[arg(short, long = "document", global = true)]
    pub(crate) documents: Vec<PathBuf>,

    /// Overrides `logging.level` (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// List registered models
    Models {},
    /// Show the steps and options of a model
    Steps {
        /// Model id or slug
        model: String,
    },
    /// Apply selections left to right and report the resulting product
    Configure {
        /// Model id or slug
        model: String,
        /// Selections as `step=option`
        #[arg(value_parser = parse_selection)]
        selections: Vec<(String, String)>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decode a product code into its selections
    Parse { model: String, code: String },
    /// Check that a product code names a consistent, manufactured product
    Validate { model: String, code: String },
    /// List codes the matrices admit but the allowlist does not
    FalsePositives { model: String },
    /// Verify every registered model and report findings
    Check {},
}

fn parse_selection(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(step, option)| !step.is_empty() && !option.is_empty())
        .map(|(step, option)| (step.to_owned(), option.to_owned()))
        .ok_or_else(|| format!("expected step=option, got '{raw}'"))
}
