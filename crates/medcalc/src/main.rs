//! `medcalc` -- clinical formula calculator CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context (config,
//! catalog source) and dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Tracks whether a Ctrl+C has already been received.
static CTRLC_RECEIVED: AtomicBool = AtomicBool::new(false);

fn main() {
    // First Ctrl+C: exit cleanly. Second: force exit.
    let _ = ctrlc::set_handler(|| {
        if CTRLC_RECEIVED.swap(true, Ordering::SeqCst) {
            std::process::exit(1);
        }
        std::process::exit(0);
    });

    let cli = Cli::parse();

    init_logging(cli.global.verbose);

    let result = RuntimeContext::from_global_args(&cli.global).and_then(|ctx| {
        match &cli.command {
            Some(Commands::Categories) => commands::categories::run(&ctx),
            Some(Commands::List(args)) => commands::list::run(&ctx, args),
            Some(Commands::Show(args)) => commands::show::run(&ctx, args),
            Some(Commands::Search(args)) => commands::search::run(&ctx, args),
            Some(Commands::Calc(args)) => commands::calc::run(&ctx, args),
            Some(Commands::Check) => commands::check::run(&ctx),
            Some(Commands::Info) => commands::info::run(&ctx),
            Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, args),
            Some(Commands::Completion(args)) => commands::completion::run(&ctx, args),
            Some(Commands::Version) => commands::version::run(&ctx),
            None => {
                use clap::CommandFactory;
                Cli::command().print_help().ok();
                println!();
                Ok(())
            }
        }
    });

    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

/// Install the stderr subscriber: `-v` forces debug output for every medcalc
/// crate, otherwise `RUST_LOG` decides. Without either, nothing is logged.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        Some(EnvFilter::new("medcalc=debug"))
    } else {
        EnvFilter::try_from_default_env().ok()
    };

    if let Some(filter) = filter {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
