//! User model

use serde::{Deserialize, Serialize};

/// Logged-in user as seen by the client
///
/// Only `token` (bearer header) and `name` (display) are consumed outside the
/// session itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub token: String,
}

impl User {
    /// Display name derived from the local part of an email address
    pub fn name_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or_default().to_string()
    }
}
