//! Authentication service
//!
//! Stub sign-up/login: no account is persisted and no password is checked.
//! Login issues an opaque token that the dashboard accepts as a bearer.

use tracing::info;

use crate::{
    constants::SESSION_TOKEN_LENGTH,
    error::{AppError, AppResult},
    models::User,
    store::SessionStore,
    utils::{generate_secure_token, validate_email},
};

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Accept a sign-up without persisting anything
    pub fn register(name: &str, email: &str) -> AppResult<()> {
        validate_email(email).map_err(|e| AppError::Validation(e.to_string()))?;
        info!(name = %name, "Sign-up accepted");
        Ok(())
    }

    /// Log in and register a fresh session token
    pub async fn login(sessions: &SessionStore, email: &str) -> AppResult<User> {
        validate_email(email).map_err(|e| AppError::Validation(e.to_string()))?;

        let user = User {
            id: user_id_for(email),
            name: User::name_from_email(email),
            email: email.to_string(),
            token: generate_secure_token(SESSION_TOKEN_LENGTH),
        };

        sessions.insert(user.clone()).await;
        info!(user_id = %user.id, "User logged in");

        Ok(user)
    }

    /// Forget a session token
    pub async fn logout(sessions: &SessionStore, token: &str) -> AppResult<()> {
        if !sessions.remove(token).await {
            return Err(AppError::Unauthorized);
        }
        Ok(())
    }

    /// Resolve a bearer token to its user
    pub async fn verify_token(sessions: &SessionStore, token: &str) -> AppResult<User> {
        sessions
            .find_by_token(token)
            .await
            .ok_or(AppError::Unauthorized)
    }
}

/// Stable user id: the same address always maps to the same id
fn user_id_for(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_OID, normalized.as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let sessions = SessionStore::new();
        let user = AuthService::login(&sessions, "a@b.com").await.unwrap();

        assert_eq!(user.name, "a");
        assert_eq!(user.token.len(), SESSION_TOKEN_LENGTH);

        let verified = AuthService::verify_token(&sessions, &user.token).await.unwrap();
        assert_eq!(verified, user);

        AuthService::logout(&sessions, &user.token).await.unwrap();
        assert!(matches!(
            AuthService::verify_token(&sessions, &user.token).await,
            Err(AppError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_login_rejects_bad_email() {
        let sessions = SessionStore::new();
        assert!(matches!(
            AuthService::login(&sessions, "not-an-email").await,
            Err(AppError::Validation(_))
        ));
        assert!(AuthService::register("Ann", "ann@example.com").is_ok());
    }

    #[tokio::test]
    async fn test_relogin_keeps_user_id() {
        let sessions = SessionStore::new();
        let first = AuthService::login(&sessions, "ann@example.com").await.unwrap();
        let second = AuthService::login(&sessions, " Ann@Example.com").await.unwrap();
        let other = AuthService::login(&sessions, "bob@example.com").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_ne!(first.token, second.token);
        assert_ne!(first.id, other.id);
    }
}
