//! The authenticated-user signal.

#[cfg(test)]
#[path = "session_state_test.rs"]
mod session_state_test;

use crate::net::types::UserProfile;

/// Session as the UI sees it. `loading` stays true until the background
/// restore settles, so guards can hold their redirect.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub user: Option<UserProfile>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
