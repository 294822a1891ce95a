#![allow(clippy::print_stderr, clippy::print_stdout)]

mod args;
mod handlers;

use crate::args::{Cli, Commands};
use crate::handlers::{catalog, codes, configure};
use anyhow::{Context, Result};
use clap::Parser;
use pcfg::domain::config::ConfiguratorConfig;
use pcfg::kernel::config::load_config;
use pcfg_logger::Logger;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config: ConfiguratorConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    config.catalog.documents.extend(cli.documents.iter().cloned());

    let _log = init_logger(&config, cli.log_level.as_deref())?;
    match &cli.config {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => debug!("Configuration loaded from defaults and environment"),
    }

    let registry = Arc::new(pcfg::init(&config).context("Failed to build the model registry")?);

    let code = match cli.command {
        Commands::Models {} => {
            catalog::list_models(&registry);
            ExitCode::SUCCESS
        },
        Commands::Steps { model } => {
            catalog::show_steps(&registry, &model)?;
            ExitCode::SUCCESS
        },
        Commands::Configure { model, selections, json } => {
            configure::configure(registry, &model, &selections, json)?;
            ExitCode::SUCCESS
        },
        Commands::Parse { model, code } => {
            codes::parse_code(&registry, &model, &code)?;
            ExitCode::SUCCESS
        },
        Commands::Validate { model, code } => codes::validate_code(&registry, &model, &code)?,
        Commands::FalsePositives { model } => {
            catalog::list_false_positives(&registry, &model)?;
            ExitCode::SUCCESS
        },
        Commands::Check {} => catalog::check_models(&registry, &config.registry),
    };

    Ok(code)
}

fn init_logger(config: &ConfiguratorConfig, level: Option<&str>) -> Result<Logger> {
    let logging = &config.logging;
    let mut builder = Logger::builder()
        .name(env!("CARGO_BIN_NAME"))
        .level_name(level.unwrap_or(&logging.level))?
        .json(logging.json);
    if let Some(directory) = &logging.directory {
        builder = builder.directory(directory.clone());
    }
    Ok(builder.init()?)
}
