// Composition tests: the engine's load-or-build flow end to end.
//
//   item table -> engine (cache / store / build) -> recommend -> filter
//
// Each test gets its own temp directory for the store artifact.

use cinesim::engine::{MatrixSource, SimilarityEngine};
use cinesim::items::{Item, ItemTable};
use cinesim::recommend::filter::RecommendationFilter;
use cinesim::recommend::{recommend, recommend_scored};
use cinesim::store::{manifest, StoreConfig};

fn movie(id: i64, title: &str, features: &str, genres: &str, year: i32) -> Item {
    Item {
        genres: genres.to_string(),
        release_year: year,
        popularity: id as f64,
        ..Item::new(id, title, features)
    }
}

fn catalogue() -> ItemTable {
    ItemTable::new(vec![
        movie(1, "The Matrix", "hacker simulation reality Wachowski Reeves", "Action ScienceFiction", 1999),
        movie(2, "The Matrix Reloaded", "hacker simulation machines Wachowski Reeves", "Action ScienceFiction", 2003),
        movie(3, "John Wick", "hitman revenge dog Reeves", "Action Thriller", 2014),
        movie(4, "Notting Hill", "bookshop actress London romance", "Comedy Romance", 1999),
        movie(5, "Inception", "dream heist subconscious Nolan", "Action ScienceFiction", 2010),
    ])
}

fn store_in(dir: &tempfile::TempDir) -> StoreConfig {
    StoreConfig {
        path: dir.path().join("models").join("cosine_sim.bin"),
    }
}

#[test]
fn first_build_saves_then_reuses() {
    let dir = tempfile::tempdir().unwrap();
    let table = catalogue();

    let mut engine = SimilarityEngine::new(store_in(&dir), 0);
    let (built, source) = engine.load_or_build(&table, false, None).unwrap();
    assert_eq!(source, MatrixSource::Built);
    assert!(engine.store().exists());
    assert!(engine.store().manifest().is_some());

    let (cached, source) = engine.load_or_build(&table, false, None).unwrap();
    assert_eq!(source, MatrixSource::Cache);
    assert_eq!(*cached, *built);

    // A fresh engine (new process) reads the store
    let mut engine = SimilarityEngine::new(store_in(&dir), 0);
    let (loaded, source) = engine.load_or_build(&table, false, None).unwrap();
    assert_eq!(source, MatrixSource::Store);
    assert_eq!(*loaded, *built);
}

#[test]
fn reordered_table_triggers_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let table = catalogue();
    SimilarityEngine::new(store_in(&dir), 0)
        .load_or_build(&table, false, None)
        .unwrap();

    // Same length, different order: the shape check alone would pass
    let mut rows = table.items().to_vec();
    rows.reverse();
    let reordered = ItemTable::new(rows);

    let mut engine = SimilarityEngine::new(store_in(&dir), 0);
    let (matrix, source) = engine.load_or_build(&reordered, false, None).unwrap();
    assert_eq!(source, MatrixSource::Built);
    assert_eq!(
        engine.store().manifest().unwrap().fingerprint,
        reordered.fingerprint()
    );

    // The rebuilt matrix follows the new row order
    assert_eq!(
        recommend("The Matrix", &reordered, &matrix, 1),
        vec!["The Matrix Reloaded"]
    );
}

#[test]
fn corrupt_store_is_rebuilt_and_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_in(&dir);
    let table = catalogue();

    std::fs::create_dir_all(config.path.parent().unwrap()).unwrap();
    std::fs::write(&config.path, b"garbage").unwrap();

    let mut engine = SimilarityEngine::new(config.clone(), 0);
    let (matrix, source) = engine.load_or_build(&table, false, None).unwrap();
    assert_eq!(source, MatrixSource::Built);

    let reread = cinesim::store::load_matrix(&config.path, Some(table.len())).unwrap();
    assert_eq!(reread, *matrix);
}

#[test]
fn store_without_manifest_is_checked_by_shape() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_in(&dir);
    let table = catalogue();

    SimilarityEngine::new(config.clone(), 0)
        .load_or_build(&table, false, None)
        .unwrap();
    manifest::remove(&config.path).unwrap();

    // Same table: reused on shape alone
    let (_, source) = SimilarityEngine::new(config.clone(), 0)
        .load_or_build(&table, false, None)
        .unwrap();
    assert_eq!(source, MatrixSource::Store);

    // Different length: shape mismatch forces a rebuild
    manifest::remove(&config.path).unwrap();
    let shorter = ItemTable::new(table.items()[..3].to_vec());
    let (matrix, source) = SimilarityEngine::new(config, 0)
        .load_or_build(&shorter, false, None)
        .unwrap();
    assert_eq!(source, MatrixSource::Built);
    assert_eq!(matrix.len(), 3);
}

#[test]
fn refresh_always_rebuilds() {
    let dir = tempfile::tempdir().unwrap();
    let table = catalogue();
    let mut engine = SimilarityEngine::new(store_in(&dir), 2);

    engine.load_or_build(&table, false, None).unwrap();
    let (_, source) = engine.load_or_build(&table, true, None).unwrap();
    assert_eq!(source, MatrixSource::Built);
}

#[test]
fn recommend_then_filter() {
    let dir = tempfile::tempdir().unwrap();
    let table = catalogue();
    let mut engine = SimilarityEngine::new(store_in(&dir), 0);
    let (matrix, _) = engine.load_or_build(&table, false, None).unwrap();

    let ranked = recommend_scored("The Matrix", &table, &matrix, 50);
    assert_eq!(ranked.len(), 4);
    assert_eq!(ranked[0].title, "The Matrix Reloaded");
    // Shares the lead actor; unrelated films score 0
    assert_eq!(ranked[1].title, "John Wick");
    assert!(ranked[1].score > ranked[2].score);

    let filter = RecommendationFilter {
        genres: vec!["ScienceFiction".to_string()],
        year_range: Some((2005, 2020)),
        ..Default::default()
    };
    let shown = filter.apply_scored(&ranked, &table);
    let titles: Vec<&str> = shown.iter().map(|(_, item)| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Inception"]);
}

#[test]
fn bundled_sample_table_recommends() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_movies.json");
    let table = cinesim::items::loader::read_table(&path).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut engine = SimilarityEngine::new(store_in(&dir), 0);
    let (matrix, _) = engine.load_or_build(&table, false, None).unwrap();

    let recs = recommend("Aliens", &table, &matrix, table.len());
    assert_eq!(recs.len(), table.len() - 1);
    assert!(recs[..2].contains(&"Alien".to_string()), "got {recs:?}");
    // The empty-feature placeholder scores 0 and sorts last by index
    assert_eq!(recs.last().map(String::as_str), Some("Untitled Placeholder"));
}

#[test]
fn failed_save_leaves_no_artifact_to_reuse() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_in(&dir);
    // "A" and "B" are identical; "C" shares one term with them
    let original = ItemTable::new(vec![
        Item::new(1, "A", "heist crew vault"),
        Item::new(2, "B", "heist crew vault"),
        Item::new(3, "C", "vault romance"),
    ]);
    SimilarityEngine::new(config.clone(), 0)
        .load_or_build(&original, false, None)
        .unwrap();

    // Same length, new order; the save is blocked by a directory at the temp path
    let reordered = ItemTable::new(vec![
        original.items()[0].clone(),
        original.items()[2].clone(),
        original.items()[1].clone(),
    ]);
    let blocker = config.path.with_file_name("cosine_sim.bin.tmp");
    std::fs::create_dir(&blocker).unwrap();

    let err = SimilarityEngine::new(config.clone(), 0)
        .load_or_build(&reordered, false, None)
        .unwrap_err();
    assert!(matches!(err, cinesim::Error::Io { .. }), "got {err:?}");
    assert!(!config.path.exists());
    assert!(manifest::read(&config.path).is_none());

    std::fs::remove_dir(&blocker).unwrap();
    let (matrix, source) = SimilarityEngine::new(config, 0)
        .load_or_build(&reordered, false, None)
        .unwrap();
    assert_eq!(source, MatrixSource::Built);
    assert_eq!(recommend("A", &reordered, &matrix, 2), vec!["B", "C"]);
}

#[test]
fn cache_holds_only_the_latest_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = catalogue();
    let shorter = ItemTable::new(table.items()[..3].to_vec());
    let mut engine = SimilarityEngine::new(store_in(&dir), 0);

    engine.load_or_build(&table, false, None).unwrap();
    let (_, source) = engine.load_or_build(&shorter, false, None).unwrap();
    assert_eq!(source, MatrixSource::Built);
    let (_, source) = engine.load_or_build(&shorter, false, None).unwrap();
    assert_eq!(source, MatrixSource::Cache);

    // The first table's matrix was evicted and the store now holds the shorter one
    let (matrix, source) = engine.load_or_build(&table, false, None).unwrap();
    assert_eq!(source, MatrixSource::Built);
    assert_eq!(matrix.len(), table.len());
}
