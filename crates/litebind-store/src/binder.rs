//! Statement binder
//!
//! A `Binder` wraps one prepared statement. Parameters are bound in order
//! starting at index 1; options tune how extraction behaves. Every
//! extraction consumes the binder and steps the statement to completion.
//!
//! A binder dropped without extraction still runs its statement, so
//! `db.prepare("INSERT ...")?.bind(1)?;` on its own performs the insert.
//! Errors on that path can only be logged; call [`Binder::execute`] to see
//! them.

use crate::errors::{bind_error, from_rusqlite, Result};
use crate::options::{BindOption, Flag, SQLITE_FLAG};
use litebind_core::errors::{LbError, LitebindError};
use litebind_core::guard::DeferredAction;
use litebind_core::{log_op_aborted, log_op_end, log_op_start};
use rusqlite::types::{FromSql, ToSql};
use rusqlite::{Row, Statement};
use std::fmt;
use std::time::Instant;

/// A prepared statement with a bind cursor and options
pub struct Binder<'conn> {
    stmt: Option<Statement<'conn>>,
    sql: String,
    index: usize,
    options: Vec<BindOption>,
    bind_failed: bool,
}

impl<'conn> Binder<'conn> {
    pub(crate) fn new(stmt: Statement<'conn>, sql: &str) -> Self {
        Self {
            stmt: Some(stmt),
            sql: sql.to_string(),
            index: 1,
            options: Vec::new(),
            bind_failed: false,
        }
    }

    /// Bind `value` to the next parameter
    pub fn bind<T: ToSql>(&mut self, value: T) -> Result<&mut Self> {
        let index = self.index;
        let stmt = self.statement_mut()?;
        if let Err(e) = stmt.raw_bind_parameter(index, value) {
            self.bind_failed = true;
            return Err(bind_error(index, e).with_sql(self.sql.as_str()));
        }
        self.index += 1;
        Ok(self)
    }

    /// Attach a built-in flag
    pub fn with_flag(&mut self, flag: Flag) -> &mut Self {
        self.options.push(flag.into());
        self
    }

    /// Attach a named option
    pub fn with_option(&mut self, option: BindOption) -> &mut Self {
        self.options.push(option);
        self
    }

    /// Whether an option with this name and value is attached
    pub fn has_flag(&self, name: &str, value: i32) -> bool {
        self.options.iter().any(|o| o.matches(name, value))
    }

    /// First option attached under `name`
    pub fn option(&self, name: &str) -> Option<&BindOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// SQL text of the statement
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Index the next `bind` will use
    pub fn next_index(&self) -> usize {
        self.index
    }

    fn throws_on_no_rows(&self) -> bool {
        self.has_flag(SQLITE_FLAG, Flag::ThrowOnNoRows as i32)
    }

    fn statement_mut(&mut self) -> Result<&mut Statement<'conn>> {
        let sql = &self.sql;
        self.stmt.as_mut().ok_or_else(|| consumed(sql))
    }

    fn no_rows(&self) -> LbError {
        LitebindError::NoRows {
            sql: self.sql.clone(),
        }
        .into()
    }

    /// Call `f` for every row; returns the number of rows seen
    pub fn for_each_row<F>(self, mut f: F) -> Result<usize>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<()>,
    {
        self.extract("extract", |stmt, binder| {
            let mut rows = stmt.raw_query();
            let mut count = 0;
            while let Some(row) = rows.next().map_err(|e| binder.step_error(e))? {
                f(row).map_err(|e| binder.column_error(e))?;
                count += 1;
            }
            if count == 0 && binder.throws_on_no_rows() {
                return Err(binder.no_rows());
            }
            Ok(count)
        })
    }

    /// Map every row through `f` and collect the results
    pub fn collect_rows<T, F>(self, mut f: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut out = Vec::new();
        self.for_each_row(|row| {
            out.push(f(row)?);
            Ok(())
        })?;
        Ok(out)
    }

    /// Read column 0 of the only row
    ///
    /// No row gives `None` unless `ThrowOnNoRows` is set. A second row is an
    /// error. Use `T = Option<U>` for a nullable column.
    pub fn single<T: FromSql>(self) -> Result<Option<T>> {
        self.extract("extract_single", |stmt, binder| {
            let mut rows = stmt.raw_query();
            let value = match rows.next().map_err(|e| binder.step_error(e))? {
                Some(row) => Some(row.get::<_, T>(0).map_err(|e| binder.column_error(e))?),
                None => None,
            };

            if value.is_none() && binder.throws_on_no_rows() {
                return Err(binder.no_rows());
            }

            if rows.next().map_err(|e| binder.step_error(e))?.is_some() {
                return Err(LitebindError::ExtraRows {
                    sql: binder.sql.clone(),
                }
                .into());
            }

            Ok(value)
        })
    }

    /// Like [`Binder::single`], with a missing row or NULL read as `T::default()`
    pub fn single_or_default<T: FromSql + Default>(self) -> Result<T> {
        Ok(self.single::<Option<T>>()?.flatten().unwrap_or_default())
    }

    /// Step the statement to completion, discarding rows
    ///
    /// Returns the number of result rows stepped (zero for DML).
    pub fn execute(self) -> Result<usize> {
        self.extract("execute", |stmt, binder| {
            let stepped = drain(stmt).map_err(|e| binder.step_error(e))?;
            if stepped == 0 && binder.throws_on_no_rows() {
                return Err(binder.no_rows());
            }
            Ok(stepped)
        })
    }

    /// Run `body` against the statement with start/end logging
    ///
    /// Any early exit, including a panic in a row callback, is logged as
    /// `aborted`.
    fn extract<T, B>(mut self, op: &'static str, body: B) -> Result<T>
    where
        B: FnOnce(&mut Statement<'conn>, &Binder<'conn>) -> Result<T>,
    {
        let Some(mut stmt) = self.stmt.take() else {
            return Err(consumed(&self.sql));
        };

        let sql = self.sql.as_str();
        let started = Instant::now();
        log_op_start!(op, sql = sql);
        let mut aborted = DeferredAction::new(|| {
            log_op_aborted!(op, duration_ms = elapsed_ms(started), sql = sql);
        });

        let value = body(&mut stmt, &self)?;
        stmt.finalize()
            .map_err(|e| from_rusqlite(e).with_op(op).with_sql(sql))?;

        aborted.dismiss();
        log_op_end!(op, duration_ms = elapsed_ms(started), sql = sql);
        Ok(value)
    }

    fn step_error(&self, err: rusqlite::Error) -> LbError {
        from_rusqlite(err).with_op("step").with_sql(self.sql.as_str())
    }

    fn column_error(&self, err: rusqlite::Error) -> LbError {
        from_rusqlite(err).with_sql(self.sql.as_str())
    }
}

impl Drop for Binder<'_> {
    fn drop(&mut self) {
        let Some(mut stmt) = self.stmt.take() else {
            return;
        };

        if self.bind_failed || std::thread::panicking() {
            tracing::debug!(
                component = module_path!(),
                op = "drop",
                sql = %self.sql,
                "statement discarded without running"
            );
            return;
        }

        match drain(&mut stmt) {
            Ok(0) if self.throws_on_no_rows() => tracing::warn!(
                component = module_path!(),
                op = "drop",
                sql = %self.sql,
                "No rows returned!"
            ),
            Ok(_) => {}
            Err(e) => tracing::warn!(
                component = module_path!(),
                op = "drop",
                sql = %self.sql,
                error = %e,
                "statement failed while running on drop"
            ),
        }
    }
}

impl fmt::Debug for Binder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("sql", &self.sql)
            .field("next_index", &self.index)
            .field("options", &self.options)
            .field("pending", &self.stmt.is_some())
            .finish()
    }
}

fn consumed(sql: &str) -> LbError {
    LbError::from(LitebindError::Internal {
        message: "statement already consumed".to_string(),
    })
    .with_sql(sql)
}

/// Step through every remaining row
fn drain(stmt: &mut Statement<'_>) -> rusqlite::Result<usize> {
    let mut rows = stmt.raw_query();
    let mut stepped = 0;
    while rows.next()?.is_some() {
        stepped += 1;
    }
    Ok(stepped)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
