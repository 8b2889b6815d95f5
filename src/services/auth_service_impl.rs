//! Local implementation of the `AuthService` trait: seed accounts plus the
//! `SQLite` store.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::Store;
use crate::models::User;
use crate::services::auth_service::{AuthError, AuthService};

pub struct LocalAuthService {
    store: Store,
}

impl LocalAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for LocalAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let account = self
            .store
            .validate_credentials(email, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        debug!(id = account.id, "Credentials accepted");
        Ok(User::from(account))
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AuthError> {
        if self.store.email_exists(email).await? {
            return Err(AuthError::EmailTaken);
        }

        let account = self
            .store
            .register_account(email, password, name)
            .await?
            .ok_or(AuthError::EmailTaken)?;

        info!(id = account.id, "New account signed in");
        Ok(User::from(account))
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        if self.store.email_exists(email).await? {
            info!(%email, "Password reset requested");
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }

    async fn resolve(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.store.find_account_by_email(email).await?.map(User::from))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        Ok(())
    }
}
