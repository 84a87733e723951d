use super::*;

fn entry(n: usize) -> RecentFloorMap {
    RecentFloorMap {
        url: format!("/api/rooms/floormaps/floormap-{n}.svg"),
        filename: format!("floormap-{n}.svg"),
        title: None,
        used_at: i64::try_from(n).unwrap(),
    }
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecentStore::new(dir.path().join("recent.json"));
    assert!(store.load().is_empty());
}

#[test]
fn corrupt_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recent.json");
    fs::write(&path, "{not json").unwrap();
    assert!(RecentStore::new(path).load().is_empty());
}

#[test]
fn record_persists_most_recent_first() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecentStore::new(dir.path().join("nested").join("recent.json"));
    store.record(entry(1)).unwrap();
    store.record(entry(2)).unwrap();

    let reloaded = RecentStore::new(store.path().to_path_buf()).load();
    let filenames: Vec<&str> = reloaded.entries().iter().map(|e| e.filename.as_str()).collect();
    assert_eq!(filenames, vec!["floormap-2.svg", "floormap-1.svg"]);
}

#[test]
fn record_caps_and_deduplicates() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecentStore::new(dir.path().join("recent.json"));
    for n in 0..12 {
        store.record(entry(n)).unwrap();
    }
    let recent = store.record(entry(5)).unwrap();
    assert_eq!(recent.len(), 8);
    assert_eq!(recent.entries()[0].filename, "floormap-5.svg");
    assert_eq!(recent.entries().iter().filter(|e| e.filename == "floormap-5.svg").count(), 1);
}

#[test]
fn oversized_file_is_trimmed_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recent.json");
    let entries: Vec<RecentFloorMap> = (0..20).map(entry).collect();
    fs::write(&path, serde_json::to_string(&entries).unwrap()).unwrap();
    assert_eq!(RecentStore::new(path).load().len(), 8);
}
