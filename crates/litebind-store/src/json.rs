//! JSON values stored in BLOB columns
//!
//! Write path: serialize with `serde_json`, bind the bytes as a BLOB.
//! Read path: take the column bytes (BLOB or TEXT), deserialize, fail if the
//! bytes are not valid JSON of the requested shape.
//!
//! ```
//! use litebind_store::{Database, JsonArray, JsonBlob};
//! use serde_json::json;
//!
//! let db = Database::open_in_memory().unwrap();
//! db.execute_batch("CREATE TABLE docs (body BLOB)").unwrap();
//!
//! let mut insert = db.prepare("INSERT INTO docs (body) VALUES (?1)").unwrap();
//! insert.bind(JsonBlob(vec![json!(1), json!("two")])).unwrap();
//! insert.execute().unwrap();
//!
//! let body: Option<JsonArray> = db.prepare("SELECT body FROM docs").unwrap().single().unwrap();
//! assert_eq!(body.unwrap().0, vec![json!(1), json!("two")]);
//! ```

use crate::binder::Binder;
use crate::errors::Result;
use crate::options::BindOption;
use litebind_core::errors::{LbError, LitebindError};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Option name consulted by [`Binder::bind_json`]
pub const JSON_FORMAT: &str = "json_format";

/// Serialization style for [`Binder::bind_json`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    #[default]
    Compact = 0,
    Pretty = 1,
}

impl From<JsonFormat> for BindOption {
    fn from(format: JsonFormat) -> Self {
        BindOption::new(JSON_FORMAT, format as i32)
    }
}

/// A serde value stored as a JSON BLOB
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonBlob<T>(pub T);

impl<T> JsonBlob<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for JsonBlob<T> {
    fn from(value: T) -> Self {
        JsonBlob(value)
    }
}

/// A JSON array column
pub type JsonArray = JsonBlob<Vec<serde_json::Value>>;

/// A JSON object column
pub type JsonObject = JsonBlob<serde_json::Map<String, serde_json::Value>>;

impl<T: Serialize> ToSql for JsonBlob<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let bytes = serde_json::to_vec(&self.0)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        Ok(ToSqlOutput::Owned(Value::Blob(bytes)))
    }
}

impl<T: DeserializeOwned> FromSql for JsonBlob<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let bytes = match value {
            ValueRef::Blob(bytes) | ValueRef::Text(bytes) => bytes,
            _ => return Err(FromSqlError::InvalidType),
        };
        serde_json::from_slice(bytes)
            .map(JsonBlob)
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Read column `idx` of `row` as JSON
pub fn read_json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    row.get::<_, JsonBlob<T>>(idx).map(JsonBlob::into_inner)
}

impl<'conn> Binder<'conn> {
    /// Serialize `value` and bind it as a BLOB to the next parameter
    ///
    /// Honours a [`JsonFormat`] option attached to the binder.
    pub fn bind_json<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        let pretty = self.has_flag(JSON_FORMAT, JsonFormat::Pretty as i32);
        let encoded = if pretty {
            tracing::debug!(
                component = module_path!(),
                op = "bind_json",
                param_index = self.next_index(),
                "binding pretty-printed JSON"
            );
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };

        let bytes = encoded.map_err(|e| {
            LbError::from(LitebindError::Serialization {
                message: e.to_string(),
            })
            .with_op("bind_json")
            .with_column(self.next_index())
            .with_sql(self.sql())
        })?;

        self.bind(Value::Blob(bytes))
    }
}
