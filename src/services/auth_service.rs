//! Domain service for authentication.
//!
//! Handles login, registration, password reset and sign-out against either
//! the local record store or the remote backend.

use thiserror::Error;

use crate::models::User;
use crate::services::messages::friendly_message;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Short text for the front end. Form errors pass through unchanged.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            other => friendly_message(&other.to_string()),
        }
    }
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials and returns the public user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if no account matches.
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Creates a non-admin account and returns it, signed in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] if the email is already in use.
    async fn register(&self, email: &str, password: &str, name: &str)
    -> Result<User, AuthError>;

    /// Starts a password reset for `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] when the local store has no such
    /// account; the remote provider reports its own errors.
    async fn reset_password(&self, email: &str) -> Result<(), AuthError>;

    /// Current stored record for `email`, `None` when no account has it.
    async fn resolve(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Drops any provider-side sign-in state.
    async fn logout(&self) -> Result<(), AuthError>;
}
