//! The binary entry point for the `geode` tool.

use std::process::ExitCode;

use clap::Parser;
use geode_app::{AppError, run};
use geode_config::{CliArgs, Config, default_config_dir};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Logging is not up until `setup` succeeds, so its errors go straight to stderr.
    let config = match setup(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&args.command, &config) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Load the config, apply CLI overrides and start logging.
fn setup(args: &CliArgs) -> Result<Config, AppError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);

    let log_dir = config_dir.join("logs");
    geode_log::init_logging(Some(log_dir.as_path()), config.debug.log_to_file, Some(&config));
    tracing::debug!(config_dir = %config_dir.display(), "configuration loaded");

    Ok(config)
}
