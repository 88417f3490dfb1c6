use super::*;

#[test]
fn memory_store_get_set_remove() {
    let mut s = MemoryStore::new();
    assert_eq!(s.get("k").unwrap(), None);
    s.set("k", "v".to_owned()).unwrap();
    assert_eq!(s.get("k").unwrap().as_deref(), Some("v"));
    s.remove("k").unwrap();
    assert_eq!(s.get("k").unwrap(), None);
}

#[test]
fn file_store_missing_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let s = FileStore::new(dir.path().join("nested/storage.json"));
    assert_eq!(s.get("anything").unwrap(), None);
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/storage.json");
    let mut a = FileStore::new(&path);
    a.set("appTheme", "dark".to_owned()).unwrap();
    a.set("other", "x".to_owned()).unwrap();

    let mut b = FileStore::new(&path);
    assert_eq!(b.get("appTheme").unwrap().as_deref(), Some("dark"));
    b.remove("other").unwrap();
    assert_eq!(a.get("other").unwrap(), None);
    assert_eq!(a.get("appTheme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "not json").unwrap();
    let s = FileStore::new(&path);
    assert!(matches!(s.get("k"), Err(VizError::Storage(_))));
}
