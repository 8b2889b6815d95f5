//! Session state holder.
//!
//! Holds the signed-in user and a coarse status for the front end. Each
//! operation returns its own result; the shared status only mirrors the most
//! recently issued operation. Operations draw a ticket when they start and a
//! completion is applied only if its ticket is still the latest, so a slow
//! login can never overwrite a newer login or a logout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::User;
use crate::services::auth_service::{AuthError, AuthService};

const FORM_ERROR: &str = "Passwords do not match or fields are empty";
const LOGIN_FORM_ERROR: &str = "Email and password are required";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    Idle,
    Loading,
    Success,
    PasswordResetSent,
    Error(String),
}

impl AuthStatus {
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Signed-in user as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    user: User,
    signed_in_at: DateTime<Utc>,
}

/// Small JSON file that lets a session survive restarts.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> anyhow::Result<Option<User>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let session: PersistedSession = serde_json::from_str(&content)?;
        debug!(signed_in_at = %session.signed_in_at, "Restoring session");
        Ok(Some(session.user))
    }

    fn save(&self, user: &User) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let session = PersistedSession {
            user: user.clone(),
            signed_in_at: Utc::now(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&session)?)?;
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

pub struct SessionState {
    auth: Arc<dyn AuthService>,
    user: watch::Sender<Option<User>>,
    status: watch::Sender<AuthStatus>,
    latest: Mutex<u64>,
    file: Option<SessionFile>,
}

impl SessionState {
    #[must_use]
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        let (user, _) = watch::channel(None);
        let (status, _) = watch::channel(AuthStatus::Idle);
        Self {
            auth,
            user,
            status,
            latest: Mutex::new(0),
            file: None,
        }
    }

    /// Persists the signed-in user to `file` and restores it now if present.
    ///
    /// The file only names the user. The restored record comes from the auth
    /// service, and a file whose account is gone or no longer matches is
    /// removed.
    pub async fn with_session_file(mut self, file: SessionFile) -> Self {
        match file.load() {
            Ok(Some(saved)) => match self.auth.resolve(&saved.email).await {
                Ok(Some(user)) if user.id == saved.id && user.is_admin == saved.is_admin => {
                    info!(id = user.id, "Session restored");
                    self.user.send_replace(Some(user));
                }
                Ok(_) => {
                    warn!(id = saved.id, "Saved session does not match a stored account, discarding");
                    if let Err(e) = file.clear() {
                        warn!(error = %e, path = %file.path().display(), "Failed to remove session file");
                    }
                }
                Err(e) => warn!(error = %e, "Could not verify saved session, starting signed out"),
            },
            Ok(None) => {}
            Err(e) => warn!(error = %e, path = %file.path().display(), "Ignoring unreadable session file"),
        }
        self.file = Some(file);
        self
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    #[must_use]
    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    #[must_use]
    pub fn subscribe_status(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    fn begin(&self) -> u64 {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *latest += 1;
        self.status.send_replace(AuthStatus::Loading);
        *latest
    }

    /// Applies `status` (and `user`, when given) if `ticket` is still the
    /// latest operation. Returns whether it was applied.
    fn finish(&self, ticket: u64, status: AuthStatus, user: Option<Option<User>>) -> bool {
        let latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        if *latest != ticket {
            debug!(ticket, latest = *latest, "Dropping stale result");
            return false;
        }

        if let Some(user) = user {
            self.persist(user.as_ref());
            self.user.send_replace(user);
        }
        self.status.send_replace(status);
        true
    }

    fn persist(&self, user: Option<&User>) {
        let Some(file) = &self.file else {
            return;
        };
        let result = match user {
            Some(user) => file.save(user),
            None => file.clear(),
        };
        if let Err(e) = result {
            warn!(error = %e, path = %file.path().display(), "Failed to update session file");
        }
    }

    fn complete_sign_in(&self, ticket: u64, result: &Result<User, AuthError>) {
        match result {
            Ok(user) => {
                self.finish(ticket, AuthStatus::Success, Some(Some(user.clone())));
            }
            Err(e) => {
                self.finish(ticket, AuthStatus::Error(e.user_message()), None);
            }
        }
    }

    pub fn set_form_error(&self, message: impl Into<String>) {
        let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
        *latest += 1;
        self.status.send_replace(AuthStatus::Error(message.into()));
    }

    /// Drops an error status back to idle; other statuses are left alone.
    pub fn clear_error(&self) {
        self.status.send_if_modified(|status| {
            if matches!(status, AuthStatus::Error(_)) {
                *status = AuthStatus::Idle;
                true
            } else {
                false
            }
        });
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            self.set_form_error(LOGIN_FORM_ERROR);
            return Err(AuthError::Validation(LOGIN_FORM_ERROR.to_string()));
        }

        let ticket = self.begin();
        let result = self.auth.login(email.trim(), password).await;
        self.complete_sign_in(ticket, &result);
        result
    }

    /// Registers and signs in. `confirm` must repeat `password`.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
        name: &str,
    ) -> Result<User, AuthError> {
        if password != confirm || email.trim().is_empty() || name.trim().is_empty() {
            self.set_form_error(FORM_ERROR);
            return Err(AuthError::Validation(FORM_ERROR.to_string()));
        }

        let ticket = self.begin();
        let result = self.auth.register(email.trim(), password, name).await;
        self.complete_sign_in(ticket, &result);
        result
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        let ticket = self.begin();
        let result = self.auth.reset_password(email.trim()).await;
        let status = match &result {
            Ok(()) => AuthStatus::PasswordResetSent,
            Err(e) => AuthStatus::Error(e.user_message()),
        };
        self.finish(ticket, status, None);
        result
    }

    /// Unconditionally clears the user and returns to idle. Any operation
    /// still in flight is invalidated.
    pub async fn logout(&self) {
        {
            let mut latest = self.latest.lock().unwrap_or_else(PoisonError::into_inner);
            *latest += 1;
            self.persist(None);
            self.user.send_replace(None);
            self.status.send_replace(AuthStatus::Idle);
        }

        if let Err(e) = self.auth.logout().await {
            warn!(error = %e, "Provider sign-out failed");
        }
        info!("Signed out");
    }
}
