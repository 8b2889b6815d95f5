//! Domain service for the Pokémon catalog.

use thiserror::Error;

use crate::models::Pokemon;
use crate::services::messages::friendly_message;

/// Errors specific to catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Pokemon not found: {0}")]
    NotFound(i32),

    #[error("Sign in required")]
    Unauthenticated,

    #[error("Administrator access required")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Internal(raw) | Self::Database(raw) => friendly_message(raw),
            other => other.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Domain service trait for the catalog.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// All entries, ordered by id.
    async fn list(&self) -> Result<Vec<Pokemon>, CatalogError>;

    async fn get(&self, id: i32) -> Result<Option<Pokemon>, CatalogError>;

    /// Inserts `pokemon` under a freshly allocated id and returns the stored entry.
    async fn add(&self, pokemon: Pokemon) -> Result<Pokemon, CatalogError>;

    /// Replaces the entry with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] and changes nothing if `id` is absent.
    async fn update(&self, id: i32, pokemon: Pokemon) -> Result<Pokemon, CatalogError>;

    /// Returns whether an entry was removed.
    async fn delete(&self, id: i32) -> Result<bool, CatalogError>;
}
