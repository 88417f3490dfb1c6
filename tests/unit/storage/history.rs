use pretty_assertions::assert_eq;

use super::*;
use crate::github::sample::sample_snapshot;
use crate::storage::kv::MemoryStore;

fn entry(n: u32, ts: i64) -> HistoryEntry {
    HistoryEntry {
        id: n.to_string(),
        title: format!("PR {n}"),
        pr_url: format!("https://github.com/o/r/pull/{n}"),
        timestamp: ts,
        repo_name: "o/r".to_owned(),
    }
}

#[test]
fn empty_store_has_no_history() {
    let h = HistoryStore::new(MemoryStore::new());
    assert!(h.entries().unwrap().is_empty());
}

#[test]
fn twelve_distinct_urls_keep_the_ten_most_recent() {
    let mut h = HistoryStore::new(MemoryStore::new());
    for n in 1..=12 {
        h.record(entry(n, i64::from(n))).unwrap();
    }
    let got = h.entries().unwrap();
    assert_eq!(got.len(), MAX_HISTORY_ITEMS);
    let ids: Vec<_> = got.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["12", "11", "10", "9", "8", "7", "6", "5", "4", "3"]);
}

#[test]
fn re_recording_a_url_moves_it_to_front_once() {
    let mut h = HistoryStore::new(MemoryStore::new());
    h.record(entry(1, 1)).unwrap();
    h.record(entry(2, 2)).unwrap();
    let mut again = entry(1, 3);
    again.title = "renamed".to_owned();
    let got = h.record(again).unwrap();

    assert_eq!(got.len(), 2);
    assert_eq!(got[0].title, "renamed");
    assert_eq!(got[0].timestamp, 3);
    assert_eq!(got[1].id, "2");
}

#[test]
fn clear_removes_everything() {
    let mut h = HistoryStore::new(MemoryStore::new());
    h.record(entry(1, 1)).unwrap();
    h.clear().unwrap();
    assert!(h.entries().unwrap().is_empty());
}

#[test]
fn stored_json_uses_camel_case_keys() {
    let mut h = HistoryStore::new(MemoryStore::new());
    h.record(entry(7, 42)).unwrap();
    let raw = h.into_inner().get(HISTORY_KEY).unwrap().unwrap();
    assert!(raw.contains("\"prUrl\":\"https://github.com/o/r/pull/7\""));
    assert!(raw.contains("\"repoName\":\"o/r\""));
}

#[test]
fn corrupt_history_is_replaced_on_record() {
    let mut store = MemoryStore::new();
    store.set(HISTORY_KEY, "{oops".to_owned()).unwrap();
    let mut h = HistoryStore::new(store);
    assert!(h.entries().is_err());
    let got = h.record(entry(1, 1)).unwrap();
    assert_eq!(got.len(), 1);
}

#[test]
fn repo_name_prefers_base_repository() {
    let snap = sample_snapshot();
    let e = HistoryEntry::from_snapshot("https://github.com/a/b/pull/1", &snap, 0);
    assert_eq!(e.repo_name, "example/repo");
    assert_eq!(e.id, "1");
}

#[test]
fn repo_name_falls_back_to_url_path() {
    let mut snap = sample_snapshot();
    snap.repo_full_name = None;
    assert_eq!(repo_name_for("https://github.com/a/b/pull/1", &snap), "a/b");
}
