//! CLI command definitions for config-cascade
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::config::ResolverOptions;
use crate::format::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Inspect cascading configuration lookups
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `.env` and `config/` (default: current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Execution mode selecting config/<mode>.* (default: $APP_ENV or development)
    #[arg(short, long, global = true)]
    pub mode: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Resolver options for the global `--root` and `--mode` flags.
    pub fn resolver_options(&self) -> ResolverOptions {
        let mut options = match self.root {
            Some(ref root) => ResolverOptions::with_root(root.clone()),
            None => ResolverOptions::discover(),
        };
        if let Some(ref mode) = self.mode {
            options = options.with_mode(mode.clone());
        }
        options
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a key and print its value
    Get(GetArgs),

    /// List where a key is looked up, highest priority first
    Sources(SourcesArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted key, e.g. settings.session.secret
    pub key: String,

    /// Fallback when no source defines the key (coerced like a .env value)
    #[arg(short, long)]
    pub default: Option<String>,

    /// Fail with the list of search locations when the key is not defined
    #[arg(long)]
    pub strict: bool,

    /// Also print which source supplied the value
    #[arg(long)]
    pub explain: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct SourcesArgs {
    /// Dotted key, e.g. settings.session.secret
    pub key: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get() {
        let cli = Cli::parse_from([
            "config-cascade",
            "--mode",
            "production",
            "get",
            "server.port",
            "--default",
            "8080",
            "--explain",
            "--format",
            "json",
        ]);
        assert_eq!(cli.mode.as_deref(), Some("production"));
        assert_eq!(cli.log, "2");
        match cli.command {
            Command::Get(ref args) => {
                assert_eq!(args.key, "server.port");
                assert_eq!(args.default.as_deref(), Some("8080"));
                assert!(args.explain);
                assert!(!args.strict);
                assert_eq!(args.format, OutputFormat::Json);
            }
            _ => panic!("expected get"),
        }

        let options = cli.resolver_options();
        assert_eq!(options.mode.as_deref(), Some("production"));
        assert_eq!(options.root, PathBuf::from("."));
    }

    #[test]
    fn test_parse_sources_with_root() {
        let cli = Cli::parse_from(["config-cascade", "sources", "a.b", "--root", "/srv/app"]);
        assert!(matches!(cli.command, Command::Sources(ref args) if args.key == "a.b"));
        let options = cli.resolver_options();
        assert_eq!(options.root, PathBuf::from("/srv/app"));
        assert_eq!(options.mode, None);
    }
}
