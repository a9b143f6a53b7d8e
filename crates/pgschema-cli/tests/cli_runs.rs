use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::{Value, json};

fn write_schema(root: &Path, relative: &str, value: Value) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create schema dir");
    }
    fs::write(path, serde_json::to_vec_pretty(&value).expect("encode schema"))
        .expect("write schema");
}

fn seed_corpus(root: &Path) {
    write_schema(
        root,
        "users.json",
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "format": "uuid" },
                "email": { "type": "string", "format": "email" },
                "age": { "type": "integer", "minimum": 18, "maximum": 65 }
            },
            "x-pg": { "table": "users", "primaryKey": ["id"] }
        }),
    );
    write_schema(
        root,
        "sales/orders.json",
        json!({
            "type": "object",
            "properties": {
                "id": { "type": "string", "format": "uuid" },
                "user_id": { "type": "string", "format": "uuid" }
            },
            "x-pg": {
                "table": "orders",
                "primaryKey": ["id"],
                "foreignKeys": [{ "columns": ["user_id"], "references": { "table": "users", "columns": ["id"] } }]
            }
        }),
    );
}

fn pgschema() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pgschema"))
}

#[test]
fn validate_passes_on_consistent_corpus() {
    let dir = tempfile::tempdir().expect("tempdir");
    let schemas = dir.path().join("schemas");
    seed_corpus(&schemas);

    let output = pgschema()
        .arg("validate")
        .arg("--schemas")
        .arg(&schemas)
        .output()
        .expect("run pgschema");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All schemas passed validation."));
}

#[test]
fn validate_fails_and_lists_diagnostics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let schemas = dir.path().join("schemas");
    seed_corpus(&schemas);
    write_schema(
        &schemas,
        "billing/invoices.json",
        json!({
            "properties": { "id": {} },
            "x-pg": {
                "table": "invoices",
                "foreignKeys": [{ "columns": ["id"], "references": { "table": "nonexistent", "columns": ["id"] } }]
            }
        }),
    );
    fs::write(schemas.join("broken.json"), "{ not json").expect("write broken");

    let output = pgschema()
        .args(["validate", "--format", "json", "--schemas"])
        .arg(&schemas)
        .output()
        .expect("run pgschema");

    assert_eq!(output.status.code(), Some(1));
    let diagnostics: Value = serde_json::from_slice(&output.stdout).expect("json report");
    let kinds: Vec<_> = diagnostics
        .as_array()
        .expect("diagnostic list")
        .iter()
        .map(|diagnostic| diagnostic["kind"].clone())
        .collect();
    assert_eq!(kinds, [json!("parse_failure"), json!("unknown_table")]);
}

#[test]
fn generate_writes_sorted_dataset() {
    let dir = tempfile::tempdir().expect("tempdir");
    let schemas = dir.path().join("schemas");
    let out = dir.path().join("data").join("data.json");
    seed_corpus(&schemas);

    let output = pgschema()
        .arg("generate")
        .arg("--schemas")
        .arg(&schemas)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run pgschema");
    assert!(output.status.success());

    let content = fs::read_to_string(&out).expect("read dataset");
    assert!(content.ends_with('\n'));
    let dataset: Value = serde_json::from_str(&content).expect("parse dataset");
    let tables: Vec<_> = dataset
        .as_object()
        .expect("dataset object")
        .keys()
        .cloned()
        .collect();
    assert_eq!(tables, ["orders", "users"]);
    assert_eq!(dataset["users"][0]["email"], json!("sample@example.com"));
    assert_eq!(dataset["users"][0]["age"], json!(42));
}

#[test]
fn generate_skips_broken_documents_and_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let schemas = dir.path().join("schemas");
    let out = dir.path().join("out").join("data.json");
    seed_corpus(&schemas);
    fs::write(schemas.join("broken.json"), "{ not json").expect("write broken");

    let output = pgschema()
        .env("RUST_LOG", "warn")
        .arg("generate")
        .arg("--schemas")
        .arg(&schemas)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run pgschema");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("broken.json"));

    let dataset: Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read dataset")).expect("parse");
    assert_eq!(dataset["orders"][0]["id"].as_str().map(str::len), Some(36));
    assert_eq!(dataset["users"][0]["age"], json!(42));
}
