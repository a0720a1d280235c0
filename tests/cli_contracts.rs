//! Output contracts for the CLI layer.

use imagefind::config::AppConfig;
use imagefind::tooling::cli::{CliContext, Commands};
use rusqlite::Connection;
use std::fs;
use tempfile::TempDir;

fn context() -> CliContext {
    CliContext::new(AppConfig::default())
}

#[test]
fn index_json_contract_has_required_fields() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.png"), b"a").unwrap();
    fs::create_dir(temp.path().join("sub")).unwrap();
    fs::write(temp.path().join("sub").join("b.png"), b"b").unwrap();

    let output = context()
        .execute(&Commands::Index {
            images: temp.path().to_path_buf(),
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.get("entries").and_then(|v| v.as_u64()), Some(2));
    assert!(parsed.get("root").and_then(|v| v.as_str()).is_some());
}

#[test]
fn inspect_json_contract_reports_table_and_columns() {
    let temp = TempDir::new().unwrap();
    let database = temp.path().join("records.db");
    let conn = Connection::open(&database).unwrap();
    conn.execute_batch(
        "CREATE TABLE PHOTO_RECORDS (FULL_NAME TEXT, IMAGE_ID TEXT, MULTI_RECORD_TYPE TEXT);",
    )
    .unwrap();
    drop(conn);

    let output = context()
        .execute(&Commands::Inspect {
            database,
            format: "json".to_string(),
        })
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(
        parsed.get("table").and_then(|v| v.as_str()),
        Some("PHOTO_RECORDS")
    );
    let columns: Vec<&str> = parsed
        .get("columns")
        .and_then(|v| v.as_array())
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(columns, vec!["FULL_NAME", "IMAGE_ID", "MULTI_RECORD_TYPE"]);
}

#[test]
fn inspect_text_reports_empty_store() {
    let temp = TempDir::new().unwrap();
    let database = temp.path().join("empty.db");
    Connection::open(&database).unwrap();

    let output = context()
        .execute(&Commands::Inspect {
            database,
            format: "text".to_string(),
        })
        .unwrap();
    assert_eq!(output, "Store has no tables");
}

#[test]
fn find_without_launch_renders_outcome_message() {
    let temp = TempDir::new().unwrap();
    let database = temp.path().join("records.db");
    let conn = Connection::open(&database).unwrap();
    conn.execute_batch(
        "CREATE TABLE PHOTO_RECORDS (FULL_NAME TEXT, IMAGE_ID TEXT, MULTI_RECORD_TYPE TEXT);
         INSERT INTO PHOTO_RECORDS VALUES ('Jane Doe', 'archive/IMG001.png', 'Type 2');",
    )
    .unwrap();
    drop(conn);
    let names = temp.path().join("names.tsv");
    fs::write(&names, "FULL_NAME\tDEPARTMENT\nJane Doe\tArchives\n").unwrap();
    let images = temp.path().join("images");
    fs::create_dir(&images).unwrap();

    let output = context()
        .execute(&Commands::Find {
            name: "Jane Doe".to_string(),
            database,
            images,
            names,
            no_launch: true,
        })
        .unwrap();
    assert_eq!(output, "Can't find 'IMG001.png' in directory");
}

#[test]
fn names_lists_join_key_values_in_file_order() {
    let temp = TempDir::new().unwrap();
    let names = temp.path().join("names.tsv");
    fs::write(
        &names,
        "FULL_NAME\tDEPARTMENT\nJane Doe\tArchives\nJohn Roe\tRecords\n",
    )
    .unwrap();

    let output = context().execute(&Commands::Names { names }).unwrap();
    assert_eq!(output, "Jane Doe\nJohn Roe");
}
