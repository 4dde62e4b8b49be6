// JSON values stored in BLOB columns

use litebind_core::ErrorKind;
use litebind_store::json::JSON_FORMAT;
use litebind_store::{read_json_column, Database, JsonArray, JsonBlob, JsonFormat, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

fn setup_test_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.execute_batch("CREATE TABLE docs (id INTEGER PRIMARY KEY, body BLOB)")
        .unwrap();
    db
}

fn insert_raw(db: &Database, body: &[u8]) -> i64 {
    let mut insert = db.prepare("INSERT INTO docs (body) VALUES (?1)").unwrap();
    insert.bind(body).unwrap();
    insert.execute().unwrap();
    db.last_insert_rowid()
}

#[test]
fn test_array_written_as_blob_and_read_back() {
    let db = setup_test_db();
    let array = vec![json!(1), json!("two"), json!({"three": 3.0}), json!(null)];

    let mut insert = db.prepare("INSERT INTO docs (body) VALUES (?1)").unwrap();
    insert.bind(JsonBlob(array.clone())).unwrap();
    insert.execute().unwrap();

    let column_type: Option<String> = db
        .prepare("SELECT typeof(body) FROM docs")
        .unwrap()
        .single()
        .unwrap();
    assert_eq!(column_type.as_deref(), Some("blob"));

    let read: Option<JsonArray> = db.prepare("SELECT body FROM docs").unwrap().single().unwrap();
    assert_eq!(read.unwrap().into_inner(), array);
}

#[test]
fn test_object_written_and_read_back() {
    let db = setup_test_db();
    let mut object = Map::new();
    object.insert("name".to_string(), json!("widget"));
    object.insert("tags".to_string(), json!(["a", "b"]));

    let mut insert = db.prepare("INSERT INTO docs (body) VALUES (?1)").unwrap();
    insert.bind(JsonBlob(object.clone())).unwrap();
    insert.execute().unwrap();

    let read: Option<JsonObject> = db.prepare("SELECT body FROM docs").unwrap().single().unwrap();
    assert_eq!(read.unwrap().0, object);
}

#[test]
fn test_typed_struct_column() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        theme: String,
        retries: u32,
    }

    let db = setup_test_db();
    let settings = Settings {
        theme: "dark".to_string(),
        retries: 3,
    };

    let mut insert = db.prepare("INSERT INTO docs (body) VALUES (?1)").unwrap();
    insert.bind_json(&settings).unwrap();
    insert.execute().unwrap();

    let read = db
        .prepare("SELECT body FROM docs")
        .unwrap()
        .collect_rows(|row| read_json_column::<Settings>(row, 0))
        .unwrap();
    assert_eq!(read, vec![settings]);
}

#[test]
fn test_invalid_bytes_fail_to_decode() {
    let db = setup_test_db();
    insert_raw(&db, b"{not json");

    let err = db
        .prepare("SELECT body FROM docs")
        .unwrap()
        .single::<JsonObject>()
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(err.column(), Some(0));
}

#[test]
fn test_array_blob_is_not_an_object() {
    let db = setup_test_db();
    insert_raw(&db, b"[1,2,3]");

    let err = db
        .prepare("SELECT body FROM docs")
        .unwrap()
        .single::<JsonObject>()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);

    let ok: Option<JsonArray> = db.prepare("SELECT body FROM docs").unwrap().single().unwrap();
    assert_eq!(ok.unwrap().0.len(), 3);
}

#[test]
fn test_bind_json_compact_by_default() {
    let db = setup_test_db();

    let mut insert = db.prepare("INSERT INTO docs (body) VALUES (?1)").unwrap();
    insert.bind_json(&json!({"a": [1, 2]})).unwrap();
    insert.execute().unwrap();

    let raw: Option<Vec<u8>> = db.prepare("SELECT body FROM docs").unwrap().single().unwrap();
    assert_eq!(raw.unwrap(), br#"{"a":[1,2]}"#.to_vec());
}

#[test]
fn test_bind_json_pretty_option() {
    let db = setup_test_db();

    let mut insert = db.prepare("INSERT INTO docs (body) VALUES (?1)").unwrap();
    insert.with_option(JsonFormat::Pretty.into());
    assert!(insert.has_flag(JSON_FORMAT, JsonFormat::Pretty as i32));
    insert.bind_json(&json!({"a": 1})).unwrap();
    insert.execute().unwrap();

    let raw: Option<Vec<u8>> = db.prepare("SELECT body FROM docs").unwrap().single().unwrap();
    let text = String::from_utf8(raw.unwrap()).unwrap();
    assert!(text.contains('\n'), "pretty output spans lines: {:?}", text);

    // Formatting does not change the decoded value
    let value: Option<JsonBlob<Value>> = db.prepare("SELECT body FROM docs").unwrap().single().unwrap();
    assert_eq!(value.unwrap().0, json!({"a": 1}));
}

#[test]
fn test_nullable_json_column() {
    let db = setup_test_db();
    db.execute_batch("INSERT INTO docs (body) VALUES (NULL)").unwrap();

    let value: Option<Option<JsonArray>> = db
        .prepare("SELECT body FROM docs")
        .unwrap()
        .single()
        .unwrap();
    assert_eq!(value, Some(None));

    let err = db
        .prepare("SELECT body FROM docs")
        .unwrap()
        .single::<JsonArray>()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}
