// Item table loader tests: primary file, sample fallback, and failures.

use std::path::Path;

use cinesim::items::loader::{load_items, read_table, resolve_items_path};
use cinesim::Error;

const MOVIES: &str = r#"[
    {"id": 19995, "title": "Avatar", "combined_features": "pandora marine Cameron",
     "genres": "Action Adventure", "release_year": 2009, "popularity": 150.4},
    {"id": 285, "title": "Pirates", "combined_features": null},
    {"id": 206647, "title": "Spectre", "combined_features": "spy Bond"}
]"#;

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn loads_primary_table_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "movies.json", MOVIES);

    let table = read_table(&path).unwrap();
    assert_eq!(table.len(), 3);
    let titles: Vec<&str> = table.items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Avatar", "Pirates", "Spectre"]);

    let avatar = &table.items()[0];
    assert_eq!(avatar.release_year, 2009);
    assert_eq!(avatar.genres, "Action Adventure");
    assert_eq!(table.items()[1].combined_features, "");
}

#[test]
fn falls_back_to_sample_when_primary_missing() {
    let dir = tempfile::tempdir().unwrap();
    let sample = write(dir.path(), "sample_movies.json", MOVIES);

    let table = load_items(&dir.path().join("movies.json"), Some(&sample)).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn primary_wins_over_sample() {
    let dir = tempfile::tempdir().unwrap();
    let primary = write(
        dir.path(),
        "movies.json",
        r#"[{"id": 1, "title": "Only", "combined_features": "x"}]"#,
    );
    let sample = write(dir.path(), "sample_movies.json", MOVIES);

    let table = load_items(&primary, Some(&sample)).unwrap();
    assert_eq!(table.len(), 1);
}

#[test]
fn missing_everything_is_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_items(
        &dir.path().join("movies.json"),
        Some(&dir.path().join("sample_movies.json")),
    )
    .unwrap_err();
    assert!(matches!(err, Error::DataUnavailable { .. }), "got {err:?}");

    let err = load_items(&dir.path().join("movies.json"), None).unwrap_err();
    assert!(matches!(err, Error::DataUnavailable { .. }));
}

#[test]
fn malformed_records_are_data_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "movies.json", r#"[{"title": "no id"}]"#);
    let err = read_table(&path).unwrap_err();
    assert!(matches!(err, Error::DataUnavailable { .. }), "got {err:?}");
}

#[test]
fn resolved_path_names_the_file_actually_read() {
    let dir = tempfile::tempdir().unwrap();
    let primary = dir.path().join("movies.json");
    let sample = write(dir.path(), "sample_movies.json", MOVIES);

    let used = resolve_items_path(&primary, Some(&sample)).unwrap();
    assert_eq!(used, sample.as_path());

    write(dir.path(), "movies.json", MOVIES);
    let used = resolve_items_path(&primary, Some(&sample)).unwrap();
    assert_eq!(used, primary.as_path());
}
