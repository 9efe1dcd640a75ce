//! Authenticated session with an explicit lifecycle.
//!
//! The session holds the bearer token and the admin's display name. It is
//! set on login, cleared on logout or on a 401 from the server, and passed
//! to the client at construction; nothing reads it from ambient storage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub display_name: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Establish the session after a successful login.
    pub fn login(&mut self, token: impl Into<String>, display_name: impl Into<String>) {
        self.token = Some(token.into());
        self.display_name = Some(display_name.into());
    }

    /// Drop the credentials. Used on explicit logout and when the server
    /// answers 401.
    pub fn logout(&mut self) {
        self.token = None;
        self.display_name = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
