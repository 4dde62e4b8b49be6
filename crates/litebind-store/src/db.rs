//! Database handle
//!
//! Opens or adopts a SQLite connection, applies `StoreConfig`, and hands out
//! binders for prepared statements.

use crate::binder::Binder;
use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, Result};
use crate::options::Flag;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// An open SQLite database
pub struct Database {
    conn: Connection,
    config: StoreConfig,
}

impl Database {
    /// Open a SQLite database at the given path with the default config
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, StoreConfig::default())
    }

    /// Open an in-memory SQLite database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
        let mut db = Self::from_connection(conn);
        db.configure(StoreConfig::default())?;
        Ok(db)
    }

    /// Open a SQLite database at the given path and apply `config`
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: StoreConfig) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| from_rusqlite(e).with_op("open"))?;
        let mut db = Self::from_connection(conn);
        db.configure(config)?;
        tracing::debug!(
            component = module_path!(),
            op = "open",
            path = %path.as_ref().display(),
            "database opened"
        );
        Ok(db)
    }

    /// Adopt an existing connection as-is
    ///
    /// No pragmas are applied; binders use the default config.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            config: StoreConfig::default(),
        }
    }

    /// Apply connection settings and keep `config` for future binders
    pub fn configure(&mut self, config: StoreConfig) -> Result<()> {
        self.conn
            .pragma_update(None, "foreign_keys", config.foreign_keys)
            .map_err(|e| from_rusqlite(e).with_op("configure"))?;

        // journal_mode answers with the mode actually in effect
        let mode: String = self
            .conn
            .pragma_update_and_check(None, "journal_mode", config.journal_mode.as_pragma(), |row| {
                row.get(0)
            })
            .map_err(|e| from_rusqlite(e).with_op("configure"))?;
        if !mode.eq_ignore_ascii_case(config.journal_mode.as_pragma()) {
            tracing::debug!(
                component = module_path!(),
                op = "configure",
                requested = config.journal_mode.as_pragma(),
                actual = %mode,
                "journal mode not applied"
            );
        }

        if let Some(ms) = config.busy_timeout_ms {
            self.conn
                .busy_timeout(Duration::from_millis(ms))
                .map_err(|e| from_rusqlite(e).with_op("configure"))?;
        }

        self.config = config;
        Ok(())
    }

    /// Prepare `sql` and return a binder for it
    pub fn prepare(&self, sql: &str) -> Result<Binder<'_>> {
        let stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| from_rusqlite(e).with_op("prepare").with_sql(sql))?;

        let mut binder = Binder::new(stmt, sql);
        if self.config.throw_on_no_rows {
            binder.with_flag(Flag::ThrowOnNoRows);
        }
        Ok(binder)
    }

    /// Run one or more statements with no parameters and no results
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn
            .execute_batch(sql)
            .map_err(|e| from_rusqlite(e).with_op("execute_batch").with_sql(sql))
    }

    /// Rowid of the most recent successful INSERT on this connection
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Rows modified by the most recent INSERT, UPDATE or DELETE
    pub fn changes(&self) -> u64 {
        self.conn.changes()
    }

    /// Settings applied by the last `configure`, or the defaults
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Borrow the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Give up the handle and return the connection
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JournalMode;

    fn foreign_keys(conn: &Connection) -> i64 {
        conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_configure_sets_foreign_keys_both_ways() {
        let mut db = Database::open_in_memory().unwrap();

        db.configure(StoreConfig {
            foreign_keys: false,
            ..StoreConfig::default()
        })
        .unwrap();
        assert_eq!(foreign_keys(db.connection()), 0);
        assert!(!db.config().foreign_keys);

        db.configure(StoreConfig {
            foreign_keys: true,
            ..StoreConfig::default()
        })
        .unwrap();
        assert_eq!(foreign_keys(db.connection()), 1);
        assert!(db.config().foreign_keys);
    }

    #[test]
    fn test_from_connection_leaves_pragmas_alone() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", false).unwrap();

        let db = Database::from_connection(conn);
        assert_eq!(foreign_keys(db.connection()), 0);
        assert_eq!(db.config().journal_mode, JournalMode::Wal);
    }

    #[test]
    fn test_into_connection_keeps_configured_state() {
        let db = Database::open_in_memory().unwrap();
        db.execute_batch("CREATE TABLE t (v TEXT); INSERT INTO t VALUES ('kept')")
            .unwrap();

        let conn = db.into_connection();
        let v: String = conn.query_row("SELECT v FROM t", [], |row| row.get(0)).unwrap();
        assert_eq!(v, "kept");
    }

    #[test]
    fn test_configure_journal_mode_on_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            journal_mode: JournalMode::Truncate,
            ..StoreConfig::default()
        };
        let db = Database::open_with_config(dir.path().join("t.db"), config).unwrap();

        let mode: String = db
            .connection()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode, "truncate");
    }

    #[test]
    fn test_prepare_invalid_sql_fails() {
        let db = Database::open_in_memory().unwrap();
        let err = db.prepare("SELEC nonsense").err().unwrap();
        assert_eq!(err.op(), Some("prepare"));
        assert_eq!(err.sql(), Some("SELEC nonsense"));
    }

    #[test]
    fn test_last_insert_rowid_and_changes() {
        let db = Database::open_in_memory().unwrap();
        db.execute_batch("CREATE TABLE t (id INTEGER PRIMARY KEY, v TEXT)")
            .unwrap();
        db.execute_batch("INSERT INTO t (v) VALUES ('a'); INSERT INTO t (v) VALUES ('b');")
            .unwrap();

        assert_eq!(db.last_insert_rowid(), 2);
        assert_eq!(db.changes(), 1);
    }
}
