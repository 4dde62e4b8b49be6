//! Column reads with the wrapper's NULL policy

use rusqlite::types::FromSql;
use rusqlite::Row;

/// Read a column, mapping SQL NULL to `T::default()`
///
/// Numbers read as zero and strings as empty, so callers of scalar columns
/// don't need to spell out `Option<T>`.
pub fn column_or_default<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromSql + Default,
{
    Ok(row.get::<_, Option<T>>(idx)?.unwrap_or_default())
}
