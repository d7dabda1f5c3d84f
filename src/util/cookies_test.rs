use super::*;

#[test]
fn format_set_carries_path_age_and_samesite() {
    assert_eq!(
        format_set("access_token", "abc.def", 3600),
        "access_token=abc.def; path=/; max-age=3600; SameSite=Lax"
    );
}

#[test]
fn format_clear_expires_immediately() {
    assert_eq!(
        format_clear("access_token"),
        "access_token=; path=/; max-age=0; SameSite=Lax"
    );
}

#[test]
fn memory_jar_set_and_clear() {
    let jar = MemoryCookies::new();
    jar.set("access_token", "tok", 3600);
    assert_eq!(jar.get("access_token"), Some("tok".to_owned()));
    jar.clear("access_token");
    assert_eq!(jar.get("access_token"), None);
}
