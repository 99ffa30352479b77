//! Catalog loading from a scratch directory.

use std::fs;
use std::path::Path;

use barfindr::Error;
use tempfile::TempDir;

fn record(id: &str, name: &str) -> String {
    format!(
        r#"{{
            "id": "{id}",
            "name": "{name}",
            "address": "{id} Red River St, Austin, TX 78701",
            "description": "Live music venue and bar.",
            "rating": 4.2,
            "imageUrl": "/images/bars/{id}.jpg",
            "hasHappyHour": false,
            "openingHours": {{ "Friday": "8pm-2am" }},
            "tags": ["Live Music"],
            "location": {{ "lat": 30.2669, "lng": -97.7361 }}
        }}"#
    )
}

fn write(dir: &Path, file: &str, contents: &str) {
    fs::write(dir.join(file), contents).unwrap();
}

#[test]
fn loads_json_records_in_id_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "stubbs.json", &record("12", "Stubb's"));
    write(dir.path(), "mohawk.json", &record("3", "Mohawk"));
    write(dir.path(), "cheer-up-charlies.json", &record("7", "Cheer Up Charlies"));

    let catalog = barfindr::load_dir(dir.path()).unwrap();
    let names: Vec<_> = catalog.bars().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Mohawk", "Cheer Up Charlies", "Stubb's"]);
    assert_eq!(catalog.by_slug("stubbs").unwrap().id, "12");
}

#[test]
fn skips_templates_schema_and_other_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "mohawk.json", &record("1", "Mohawk"));
    write(dir.path(), "_template.json", "{ not even json");
    write(dir.path(), "schema.json", "{}");
    write(dir.path(), "README.md", "# bars");
    fs::create_dir(dir.path().join("drafts")).unwrap();

    let catalog = barfindr::load_dir(dir.path()).unwrap();
    assert_eq!(catalog.len(), 1);
}

#[test]
fn malformed_record_names_the_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "mohawk.json", &record("1", "Mohawk"));
    write(dir.path(), "broken.json", r#"{ "id": "2", "name": "Broken" }"#);

    match barfindr::load_dir(dir.path()) {
        Err(Error::Parse { path, .. }) => assert!(path.ends_with("broken.json")),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let err = barfindr::load_dir(&missing).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("nope"));
}

#[test]
fn empty_directory_gives_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let catalog = barfindr::load_dir(dir.path()).unwrap();
    assert!(catalog.is_empty());
    assert!(catalog.all_tags().is_empty());
    assert_eq!(catalog.next_id(), "1");
}

#[test]
fn validation_flags_records_that_parse_but_are_incomplete() {
    let dir = TempDir::new().unwrap();
    let incomplete = record("1", "Mohawk").replace(r#""tags": ["Live Music"]"#, r#""tags": []"#);
    write(dir.path(), "mohawk.json", &incomplete);
    write(dir.path(), "mohawk-copy.json", &record("1", "Mohawk Patio"));

    let report = barfindr::load_dir(dir.path()).unwrap().validate();
    let messages: Vec<String> = report.issues.iter().map(|i| i.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "bar 1: tags: at least one tag is required".to_string(),
            "id: id \"1\" is used by 2 bars".to_string(),
        ]
    );
}
