//! Query command
//!
//! Usage: litebind query --db <FILE> --sql <SQL> [--param <VALUE>]... [--require-rows]
//!
//! Prints one JSON array per row. BLOB columns holding valid JSON are
//! decoded; any other BLOB prints as a hex string.

use super::StatementArgs;
use clap::Args;
use litebind_store::{Flag, Result};
use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde_json::Value;

#[derive(Debug, Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub statement: StatementArgs,

    /// Fail when the query returns no rows
    #[arg(long)]
    pub require_rows: bool,
}

/// Execute query command
pub fn execute(args: QueryArgs) -> Result<()> {
    let db = args.statement.open()?;

    let mut binder = db.prepare(&args.statement.sql)?;
    if args.require_rows {
        binder.with_flag(Flag::ThrowOnNoRows);
    }
    args.statement.bind_all(&mut binder)?;

    binder.for_each_row(|row| {
        println!("{}", Value::Array(row_to_json(row)?));
        Ok(())
    })?;
    Ok(())
}

fn row_to_json(row: &Row<'_>) -> rusqlite::Result<Vec<Value>> {
    let count = row.as_ref().column_count();
    (0..count)
        .map(|idx| row.get_ref(idx).map(value_to_json))
        .collect()
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => {
            serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(hex::encode(bytes)))
        }
    }
}
