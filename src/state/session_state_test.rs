use super::*;

#[test]
fn default_session_is_loading_and_anonymous() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(!state.is_authenticated());
}

#[test]
fn session_with_user_is_authenticated() {
    let state = SessionState {
        user: Some(UserProfile {
            id: 1,
            email: "ops@blaze.app".to_owned(),
            first_name: None,
            last_name: None,
            user_type: Some("manager_staff".to_owned()),
        }),
        loading: false,
    };
    assert!(state.is_authenticated());
}
