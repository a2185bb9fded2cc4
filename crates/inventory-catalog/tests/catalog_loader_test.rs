use inventory_catalog::loader::{CatalogLoader, LoadError, LoadWarning, RecordError};
use snapshot_cache::SnapshotSource;
use std::fs;

const CATALOG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<products>
  <product name="Garden Hose" price="24.99" qty="12" />
  <product name="Rake" price="17.50" qty="4" />
  <product name="Gloves" price="abc" qty="40" />
  <product name="Seed Mix" price="3.49" qty="150" />
</products>
"#;

#[test]
fn test_missing_file_is_an_empty_catalog_with_one_warning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.xml");
    let loader = CatalogLoader::new(&path);

    let report = loader.load_blocking().expect("A missing file is not an error");

    assert!(report.items.is_empty());
    assert_eq!(report.warnings.len(), 1);
    match &report.warnings[0] {
        LoadWarning::SourceUnavailable { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("Expected SourceUnavailable, got {:?}", other),
    }
}

#[test]
fn test_empty_file_is_an_empty_catalog_without_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    fs::write(&path, "").unwrap();

    let report = CatalogLoader::new(&path).load_blocking().unwrap();
    assert!(report.items.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_file_with_one_bad_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    fs::write(&path, CATALOG).unwrap();

    let report = CatalogLoader::new(&path).load_blocking().unwrap();

    let names: Vec<_> = report.items.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Garden Hose", "Rake", "Seed Mix"]);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(
        &report.warnings[0],
        LoadWarning::RecordMalformed { index: 2, cause: RecordError::InvalidPrice(raw), .. } if raw == "abc"
    ));
}

#[tokio::test]
async fn test_async_load_matches_blocking_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    fs::write(&path, CATALOG).unwrap();
    let loader = CatalogLoader::new(&path);

    let via_source = loader.load().await.unwrap();
    let via_blocking = loader.load_blocking().unwrap();

    assert_eq!(via_source, via_blocking);
    assert_eq!(loader.describe(), path.display().to_string());
}

#[tokio::test]
async fn test_broken_document_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    fs::write(&path, "<products><product name=\"A\" price=\"1\" qty=\"1\"></catalog>").unwrap();

    let result = CatalogLoader::new(&path).load().await;
    assert!(
        matches!(result, Err(LoadError::MalformedDocument { .. })),
        "Expected MalformedDocument, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_partially_written_file_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xml");
    let cut = CATALOG.find("<product name=\"Seed Mix\"").unwrap();
    fs::write(&path, &CATALOG[..cut]).unwrap();

    let result = CatalogLoader::new(&path).load().await;
    assert!(
        matches!(result, Err(LoadError::MalformedDocument { .. })),
        "Expected MalformedDocument, got {:?}",
        result
    );
}
