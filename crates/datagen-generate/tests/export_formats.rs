use std::fs;
use std::path::PathBuf;

use datagen_core::{EntityType, FieldValue, Record};
use datagen_generate::{
    Batch, ExportFormat, GenerationError, Session, export_records, export_session,
};

fn record(fields: &[(&str, FieldValue)]) -> Record {
    fields
        .iter()
        .map(|(label, value)| (label.to_string(), value.clone()))
        .collect()
}

fn mixed_records() -> Vec<Record> {
    vec![
        record(&[
            ("Name", FieldValue::Text("Ada Lovelace".to_string())),
            ("Age", FieldValue::Int(36)),
        ]),
        record(&[
            ("Name", FieldValue::Text("Alan Turing".to_string())),
            ("Balance", FieldValue::Float(1234.5)),
        ]),
    ]
}

#[test]
fn csv_uses_union_header_and_blank_cells() {
    let bytes = export_records(&mixed_records(), ExportFormat::Csv).expect("csv export");
    let text = String::from_utf8(bytes).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["Name,Age,Balance", "Ada Lovelace,36,", "Alan Turing,,1234.50"]);
}

#[test]
fn json_preserves_field_order() {
    let bytes = export_records(&mixed_records(), ExportFormat::Json).expect("json export");
    let text = String::from_utf8(bytes).expect("utf8");
    let name = text.find("\"Name\"").expect("name key");
    let age = text.find("\"Age\"").expect("age key");
    assert!(name < age);

    let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value[0]["Age"], 36);
    assert_eq!(value[1]["Balance"], 1234.5);
}

#[test]
fn markdown_renders_a_table() {
    let bytes = export_records(&mixed_records(), ExportFormat::Markdown).expect("markdown export");
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.contains("| Name | Age | Balance |"));
    assert!(text.contains("| Ada Lovelace | 36 |  |"));
    assert!(text.contains("2 record(s)"));
}

#[test]
fn empty_session_cannot_be_exported() {
    let session = Session::new();
    let err = export_session(&session, ExportFormat::Csv).expect_err("empty session");
    assert!(matches!(err, GenerationError::EmptySession));
}

#[test]
fn session_export_writes_the_current_batch() {
    let mut session = Session::new();
    session.replace(Batch::new(EntityType::Employee, mixed_records()));

    let dir: PathBuf = std::env::temp_dir().join(format!("datagen-export-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("people.csv");

    let format = ExportFormat::from_path(&path).expect("format from extension");
    let bytes = export_session(&session, format).expect("export");
    fs::write(&path, &bytes).expect("write export");
    let written = fs::read_to_string(&path).expect("read export");
    assert!(written.starts_with("Name,Age,Balance"));

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn unknown_extensions_are_rejected() {
    let err = ExportFormat::from_path(std::path::Path::new("records.xlsx")).expect_err("xlsx");
    assert!(matches!(err, GenerationError::UnsupportedFormat(_)));
}
