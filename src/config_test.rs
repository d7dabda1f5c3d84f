use super::*;

#[test]
fn normalize_base_strips_trailing_slashes() {
    assert_eq!(normalize_base("http://api.blaze.app/"), "http://api.blaze.app");
    assert_eq!(normalize_base("http://api.blaze.app///"), "http://api.blaze.app");
    assert_eq!(normalize_base("http://api.blaze.app/api"), "http://api.blaze.app/api");
}

#[test]
fn bases_have_no_trailing_slash() {
    assert!(!api_base().ends_with('/'));
    assert!(!ws_base().ends_with('/'));
}
