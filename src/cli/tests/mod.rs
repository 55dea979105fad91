//! Unit tests for CLI argument parsing.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{Cli, Commands},
    services::vlc::Action,
};

#[test]
fn send_parses_slot_actions() {
    let cli = Cli::try_parse_from(["vlcdeck", "send", "play-slot:3"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::Send {
            action: Action::PlaySlot(3)
        }
    ));
}

#[test]
fn send_accepts_host_aliases() {
    let cli = Cli::try_parse_from(["vlcdeck", "send", "prev"]).unwrap();

    assert!(matches!(
        cli.command,
        Commands::Send {
            action: Action::Previous
        }
    ));
}

#[test]
fn send_rejects_unknown_action() {
    assert!(Cli::try_parse_from(["vlcdeck", "send", "rewind"]).is_err());
    assert!(Cli::try_parse_from(["vlcdeck", "send", "playID"]).is_err());
}

#[test]
fn config_flag_is_global() {
    let cli = Cli::try_parse_from(["vlcdeck", "status", "--config", "/tmp/vlc.toml"]).unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("/tmp/vlc.toml")));
    assert_eq!(
        cli.config_path().unwrap(),
        PathBuf::from("/tmp/vlc.toml")
    );
}

#[test]
fn schema_describes_player_section() {
    let schema = super::commands::schema::execute().unwrap();

    assert!(schema.contains("\"player\""));
    assert!(schema.contains("high_resolution"));
}
