//! Remote implementation of the `AuthService` trait.
//!
//! The identity provider owns secrets; the backend owns the user record.
//! Registration commits to the provider first and, if the record cannot be
//! created, deletes the new identity again. That rollback is best effort:
//! when it fails the identity is left orphaned and only a warning is logged.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::backend::BackendClient;
use crate::clients::identity::IdentityProvider;
use crate::models::User;
use crate::services::auth_service::{AuthError, AuthService};

pub struct RemoteAuthService {
    identity: Arc<dyn IdentityProvider>,
    backend: BackendClient,
}

impl RemoteAuthService {
    #[must_use]
    pub fn new(identity: Arc<dyn IdentityProvider>, backend: BackendClient) -> Self {
        Self { identity, backend }
    }
}

fn provider_error(err: &anyhow::Error) -> AuthError {
    AuthError::Provider(format!("{err:#}"))
}

#[async_trait]
impl AuthService for RemoteAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.identity
            .sign_in(email, password)
            .await
            .map_err(|e| provider_error(&e))?;

        match self.backend.get_user(email).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                self.identity.sign_out().await;
                Err(AuthError::UserNotFound)
            }
            Err(e) => {
                self.identity.sign_out().await;
                Err(e.into())
            }
        }
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AuthError> {
        let session = self
            .identity
            .create_account(email, password)
            .await
            .map_err(|e| provider_error(&e))?;

        let record = User {
            id: 0,
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            is_admin: false,
        };

        match self.backend.create_user(&record).await {
            Ok(user) => {
                info!(id = user.id, "Remote account registered");
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "User record creation failed, rolling back identity");
                if let Err(rollback) = self.identity.delete_account(&session).await {
                    warn!(error = %rollback, "Identity rollback failed");
                }
                self.identity.sign_out().await;
                Err(e.into())
            }
        }
    }

    async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        self.identity
            .send_password_reset(email)
            .await
            .map_err(|e| provider_error(&e))
    }

    async fn resolve(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self.backend.get_user(email).await?)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.identity.sign_out().await;
        Ok(())
    }
}
