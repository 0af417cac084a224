mod commands;

use clap::{Parser, Subcommand};
use commands::*;
use crudgen_core::{init_logging, CoreError, GeneratorConfig, LoggingConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(about = "Resolve and plan admin CRUD resources for a project model")]
#[command(version)]
struct Cli {
    /// Generator configuration file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a selection that selects every entity with a resource
    InitSelection {
        /// Project model file (YAML)
        #[arg(long)]
        model: PathBuf,

        /// Where to write the selection, stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show which resources a selection resolves to
    Resolve {
        /// Project model file (YAML)
        #[arg(long)]
        model: PathBuf,

        /// Selection file (YAML)
        #[arg(long)]
        selection: PathBuf,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Plan the files to generate for a selection
    Plan {
        /// Project model file (YAML)
        #[arg(long)]
        model: PathBuf,

        /// Selection file (YAML)
        #[arg(long)]
        selection: PathBuf,

        /// Version of the host runtime, checked against the configured minimum
        #[arg(long)]
        runtime_version: Option<String>,

        /// Where to write the plan, stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>, log_level: Option<String>) -> Result<GeneratorConfig, CoreError> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default().apply_env(),
    };

    if let Some(level) = log_level {
        config.logging.level = level;
        config.validate()?;
    }

    Ok(config)
}

fn main() -> Result<(), CoreError> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.log_level)?;
    init_logging(&LoggingConfig::from_settings(&config.logging))
        .map_err(|e| CoreError::configuration(format!("failed to initialize logging: {}", e)))?;

    match cli.command {
        Commands::InitSelection { model, output } => {
            init_selection::run(&model, output.as_deref())?;
        }
        Commands::Resolve { model, selection, json } => {
            resolve::run(&config, &model, &selection, json)?;
        }
        Commands::Plan {
            model,
            selection,
            runtime_version,
            output,
        } => {
            plan::run(
                &config,
                &model,
                &selection,
                runtime_version.as_deref(),
                output.as_deref(),
            )?;
        }
    }

    Ok(())
}
