mod adapters;
mod cli;
mod config;
mod core;
#[cfg(test)]
mod testing;
mod web;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let args = Cli::parse();
    init_tracing(args.quiet, args.verbose);
    cli::context::init(args.config.as_deref());

    let api_token = args.api_token.as_deref();
    let result = match &args.command {
        Commands::Serve { bind } => cli::commands::serve::execute(bind.as_deref(), api_token),
        Commands::Export { report } => cli::commands::export::execute(report, api_token),
        Commands::CheckConfig => cli::commands::check_config::execute(api_token),
    };

    if let Err(e) = result {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

/// Log to stderr so exports and other stdout output stay clean.
fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("MARKETPLACE_ADMIN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
