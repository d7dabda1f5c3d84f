use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Snapshot {
    id: i64,
    email: String,
}

#[test]
fn memory_store_round_trips_values() {
    let store = MemoryStore::new();
    assert!(store.available());
    store.set("k", "v");
    assert_eq!(store.get("k"), Some("v".to_owned()));
    store.remove("k");
    assert_eq!(store.get("k"), None);
}

#[test]
fn unavailable_store_noops_and_reads_absent() {
    let store = MemoryStore::unavailable();
    assert!(!store.available());
    store.set("k", "v");
    assert_eq!(store.get("k"), None);
    // Removal on an unavailable store must not panic either.
    store.remove("k");
}

#[test]
fn load_json_rejects_stringified_junk() {
    let store = MemoryStore::new();
    store.set("user", "undefined");
    assert_eq!(load_json::<Snapshot>(&store, "user"), None);
    store.set("user", "null");
    assert_eq!(load_json::<Snapshot>(&store, "user"), None);
    store.set("user", "{not json");
    assert_eq!(load_json::<Snapshot>(&store, "user"), None);
}

#[test]
fn save_then_load_json_round_trips() {
    let store = MemoryStore::new();
    let snapshot = Snapshot {
        id: 7,
        email: "ops@blaze.app".to_owned(),
    };
    save_json(&store, "user", &snapshot);
    assert_eq!(load_json::<Snapshot>(&store, "user"), Some(snapshot));
}
