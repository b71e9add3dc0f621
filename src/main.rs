//! config-cascade
//!
//! Command-line inspector for cascading configuration lookups.

use anyhow::Result;
use clap::Parser;
use config_cascade::cli::{Cli, Command, GetArgs, SourcesArgs};
use config_cascade::format::{format_locations, format_resolved, format_value};
use config_cascade::logging::{self, LogTarget};
use config_cascade::value::coerce;
use config_cascade::{ConfigError, Resolver};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), logging::level_for(cli.verbose))?;

    let resolver = Resolver::new(cli.resolver_options());
    let mode = resolver.mode()?;
    debug!(root = %resolver.options().root.display(), %mode, "Resolver ready");

    match cli.command {
        Command::Get(ref args) => run_get(&resolver, args),
        Command::Sources(ref args) => run_sources(&resolver, args),
    }
}

fn run_get(resolver: &Resolver, args: &GetArgs) -> Result<()> {
    if let Some(resolved) = resolver.resolve(&args.key)? {
        if args.explain {
            println!("{}", format_resolved(&resolved, args.format));
        } else {
            println!("{}", format_value(&resolved.value, args.format));
        }
        return Ok(());
    }

    if let Some(ref raw) = args.default {
        println!("{}", format_value(&coerce(raw), args.format));
        return Ok(());
    }

    if args.strict {
        let locations = resolver.search_locations(&args.key)?;
        return Err(ConfigError::not_found(&args.key, &locations, None).into());
    }

    // Undefined: print nothing, exit cleanly.
    debug!(key = %args.key, "No value");
    Ok(())
}

fn run_sources(resolver: &Resolver, args: &SourcesArgs) -> Result<()> {
    let locations = resolver.search_locations(&args.key)?;
    println!("{}", format_locations(&locations, args.format));
    Ok(())
}
