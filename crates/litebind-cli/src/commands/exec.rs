//! Exec command
//!
//! Usage: litebind exec --db <FILE> --sql <SQL> [--param <VALUE>]...

use super::StatementArgs;
use clap::Args;
use litebind_store::Result;

#[derive(Debug, Args)]
pub struct ExecArgs {
    #[command(flatten)]
    pub statement: StatementArgs,
}

/// Execute exec command
pub fn execute(args: ExecArgs) -> Result<()> {
    let db = args.statement.open()?;

    let mut binder = db.prepare(&args.statement.sql)?;
    args.statement.bind_all(&mut binder)?;
    binder.execute()?;

    println!("{}", db.changes());
    Ok(())
}
