use super::*;

#[test]
fn protected_prefixes_match_on_segment_boundaries() {
    assert!(is_protected_path("/dashboard"));
    assert!(is_protected_path("/dashboard/vehicles"));
    assert!(is_protected_path("/drivers"));
    assert!(is_protected_path("/drivers/42"));
    assert!(!is_protected_path("/driversabc"));
    assert!(!is_protected_path("/login"));
    assert!(!is_protected_path("/"));
    assert!(!is_protected_path("/analytics"));
}

#[test]
fn missing_cookie_redirects_protected_paths_to_login() {
    assert_eq!(edge_redirect("/dashboard", false), Some("/login"));
    assert_eq!(edge_redirect("/drivers/9", false), Some("/login"));
}

#[test]
fn present_cookie_passes_even_if_expired_upstream() {
    assert_eq!(edge_redirect("/dashboard", true), None);
}

#[test]
fn unlisted_paths_are_never_intercepted() {
    assert_eq!(edge_redirect("/login", false), None);
    assert_eq!(edge_redirect("/", false), None);
}

#[test]
fn cookie_header_lookup_requires_nonempty_value() {
    assert!(cookie_header_has("a=1; access_token=tok.x", "access_token"));
    assert!(cookie_header_has("access_token=tok", "access_token"));
    assert!(!cookie_header_has("access_token=", "access_token"));
    assert!(!cookie_header_has("access_token_old=tok", "access_token"));
    assert!(!cookie_header_has("refresh_token=tok", "access_token"));
}
