//! Command-line interface.
//!
//! `run` keeps the bridge alive and logs what it publishes; the other
//! commands do a single round-trip against the player and exit.

mod commands;
pub mod formatting;
mod types;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use types::{CliError, CommandResult};

use crate::{
    config::{Config, ConfigPaths},
    services::vlc::Action,
};

/// vlcdeck command line.
#[derive(Parser, Debug)]
#[command(name = "vlcdeck", version)]
#[command(about = "Control-surface bridge for the VLC HTTP interface")]
pub struct Cli {
    /// Config file, defaults to $XDG_CONFIG_HOME/vlcdeck/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bridge until interrupted, reloading the config file on change
    Run,
    /// Poll the player once and print every published variable
    Status,
    /// Send one command: play, play-slot:N, stop, pause, next, previous,
    /// fullscreen, loop, shuffle, repeat
    Send {
        /// Action name, with `:N` for a playlist slot
        action: Action,
    },
    /// Print the JSON schema of the config file
    Schema,
}

impl Cli {
    /// Resolves the config file path.
    ///
    /// # Errors
    /// Returns error if no path was given and there is no config directory.
    pub fn config_path(&self) -> Result<PathBuf, CliError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(ConfigPaths::main_config()?),
        }
    }

    /// Runs the selected command.
    ///
    /// # Errors
    /// Returns error if the config is invalid or the command fails.
    pub async fn execute(self, config: Config) -> CommandResult {
        match self.command {
            Commands::Run => {
                let path = self.config_path()?;
                commands::run::execute(&path, config).await
            }
            Commands::Status => commands::status::execute(&config).await,
            Commands::Send { action } => commands::send::execute(&config, action).await,
            Commands::Schema => commands::schema::execute(),
        }
    }
}

#[cfg(test)]
mod tests;
