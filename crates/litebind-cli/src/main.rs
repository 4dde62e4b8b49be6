//! litebind CLI
//!
//! Run statements against a SQLite database and print rows as JSON

use clap::{Parser, Subcommand};
use litebind_core::log_op_error;
use litebind_core::logging_facility::{init, Profile};
use std::time::Instant;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "litebind")]
#[command(about = "litebind - SQLite statements with JSON blob columns", long_about = None)]
struct Cli {
    /// Logging profile (development, production, test)
    #[arg(long, global = true, default_value = "production")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a statement to completion and print the number of changed rows
    Exec(commands::exec::ExecArgs),
    /// Run a query and print each row as a JSON array
    Query(commands::query::QueryArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_profile);

    let started = Instant::now();
    let (op, result) = match cli.command {
        Commands::Exec(args) => ("cli_exec", commands::exec::execute(args)),
        Commands::Query(args) => ("cli_query", commands::query::execute(args)),
    };

    if let Err(e) = result {
        log_op_error!(
            op,
            e.clone(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
        );
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
