use std::sync::Arc;

use super::*;
use crate::util::cookies::MemoryCookies;
use crate::util::storage::MemoryStore;

fn store_with_jar() -> (TokenStore, Arc<MemoryCookies>) {
    let jar = Arc::new(MemoryCookies::new());
    let tokens = TokenStore::new(Arc::new(MemoryStore::new()), jar.clone());
    (tokens, jar)
}

#[test]
fn set_persists_both_tokens_and_mirrors_cookie() {
    let (tokens, jar) = store_with_jar();
    tokens.set("acc-1", Some("ref-1"));
    assert_eq!(tokens.access(), Some("acc-1".to_owned()));
    assert_eq!(tokens.refresh(), Some("ref-1".to_owned()));
    assert_eq!(jar.get(ACCESS_KEY), Some("acc-1".to_owned()));
}

#[test]
fn set_with_none_refresh_keeps_existing_refresh() {
    let (tokens, jar) = store_with_jar();
    tokens.set("acc-1", Some("ref-1"));
    tokens.set("acc-2", None);
    assert_eq!(tokens.access(), Some("acc-2".to_owned()));
    assert_eq!(tokens.refresh(), Some("ref-1".to_owned()));
    assert_eq!(jar.get(ACCESS_KEY), Some("acc-2".to_owned()));
}

#[test]
fn set_with_empty_refresh_removes_it() {
    let (tokens, _jar) = store_with_jar();
    tokens.set("acc-1", Some("ref-1"));
    tokens.set("acc-2", Some(""));
    assert_eq!(tokens.refresh(), None);
}

#[test]
fn set_with_empty_access_is_a_noop() {
    let (tokens, jar) = store_with_jar();
    tokens.set("", Some("ref-1"));
    assert_eq!(tokens.access(), None);
    assert_eq!(tokens.refresh(), None);
    assert_eq!(jar.get(ACCESS_KEY), None);
}

#[test]
fn clear_removes_tokens_and_cookie() {
    let (tokens, jar) = store_with_jar();
    tokens.set("acc-1", Some("ref-1"));
    tokens.clear();
    assert_eq!(tokens.access(), None);
    assert_eq!(tokens.refresh(), None);
    assert_eq!(jar.get(ACCESS_KEY), None);
}

#[test]
fn unavailable_storage_reads_absent_and_never_panics() {
    let tokens = TokenStore::new(Arc::new(MemoryStore::unavailable()), Arc::new(MemoryCookies::new()));
    tokens.set("acc-1", Some("ref-1"));
    assert_eq!(tokens.access(), None);
    assert_eq!(tokens.refresh(), None);
    tokens.clear();
}
