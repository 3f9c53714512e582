//! Authentication response DTOs

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Sign-up response
#[derive(Debug, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub message: String,
}

/// Login response carrying the session user and its token
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
}

/// Logout response
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
