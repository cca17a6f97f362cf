//! CLI module - Command-line interface for Cosmorate
//!
//! This module provides a structured CLI using clap for argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cosmorate - product reviews with moderation
#[derive(Parser)]
#[command(name = "cosmorate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config.toml (otherwise the usual locations are searched)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Create an administrator, or promote an existing account
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_serve() {
        let cli = Cli::parse_from(["cosmorate"]);
        assert_eq!(cli.command(), Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_create_admin_with_config() {
        let cli = Cli::parse_from([
            "cosmorate",
            "create-admin",
            "--email",
            "root@x.com",
            "--username",
            "root",
            "--password",
            "secret1",
            "--config",
            "/etc/cosmorate.toml",
        ]);

        assert_eq!(
            cli.command(),
            Commands::CreateAdmin {
                email: "root@x.com".to_string(),
                username: "root".to_string(),
                password: "secret1".to_string(),
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("/etc/cosmorate.toml")));
    }
}
