//! vlcdeck entry point.

use std::{error::Error, process};

use clap::Parser;
use tracing::{Level, info, span};
use vlcdeck::{
    cli::{Cli, CliError, Commands, formatting::format_error},
    config::Config,
    tracing_config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match cli
        .config_path()
        .and_then(|path| Config::load(&path).map_err(CliError::from))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    };

    let _file_guard = match cli.command {
        Commands::Run if config.general.log_to_file => {
            Some(tracing_config::init_with_file(config.general.log_level)?)
        }
        _ => {
            tracing_config::init(config.general.log_level)?;
            None
        }
    };

    let _span = span!(Level::INFO, "vlcdeck").entered();
    if matches!(cli.command, Commands::Run) {
        info!("Starting vlcdeck {}", env!("CARGO_PKG_VERSION"));
    }

    match cli.execute(config).await {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
