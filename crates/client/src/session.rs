//! Explicit bearer-token session.
//!
//! The session is an owned value created on login and dropped on logout or
//! on a 401; it is injected into the API client rather than read from any
//! ambient storage, so every call site's auth dependency is visible in its
//! signature.

use crate::models::UserProfile;

/// An authenticated session: the bearer token plus the logged-in principal.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
