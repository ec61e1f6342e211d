use primext::prelude::*;
use primext::{volume, Settings};
use serde::Serialize;
use tempfile::TempDir;

#[derive(Serialize)]
struct Row {
    id: u32,
    label: String,
}

fn rows() -> Vec<Row> {
    vec![
        Row {
            id: 1,
            label: "first".to_string(),
        },
        Row {
            id: 2,
            label: "second, quoted".to_string(),
        },
    ]
}

#[test]
fn helpers_reject_empty_paths() {
    let empty = std::path::Path::new("");
    for err in [
        empty.file_exists().unwrap_err(),
        empty.read_text().unwrap_err(),
        empty.write_text("x").unwrap_err(),
        empty.delete_file().unwrap_err(),
    ] {
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }
}

#[test]
fn export_then_move_and_hide() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("rows.csv");
    let archive = dir.path().join("archive.csv");

    rows().write_csv(&csv_path, false).unwrap();
    assert_eq!(
        csv_path.read_text().unwrap(),
        "1,first\n2,\"second, quoted\"\n"
    );

    csv_path.move_to(&archive, false).unwrap();
    assert!(!csv_path.file_exists().unwrap());

    let hidden = archive.hide().unwrap();
    assert!(hidden
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with('.'));
    assert!(hidden.size_in_kb().unwrap() > 0.0);
}

#[test]
fn settings_drive_xml_output() {
    let dir = TempDir::new().unwrap();
    let settings_path = dir.path().join("settings.json");
    std::fs::write(&settings_path, r#"{"xmlIndentation": 2, "locale": "fr-FR"}"#).unwrap();

    let settings = Settings::load(&settings_path).unwrap();
    let xml_path = dir.path().join("rows.xml");
    rows()
        .write_xml(&xml_path, &settings.xml_options("Rows"))
        .unwrap();

    let xml = xml_path.read_text().unwrap();
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
    assert!(xml.contains("\n  <Item>\n    <Id>1</Id>"));
    assert_eq!(settings.locale.group_separator, '\u{202F}');
}

#[cfg(unix)]
#[test]
fn volume_of_temp_dir() {
    let dir = TempDir::new().unwrap();
    let info = volume::volume_info(dir.path()).unwrap();
    assert!(info.total_bytes >= info.free_bytes);
    let canonical = dir.path().canonicalize().unwrap();
    assert!(canonical.starts_with(&info.mount_point) || info.kind == volume::VolumeKind::Unknown);
}
