use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::constants::accounts::SEED_ID_CEILING;
use crate::entities::{accounts, prelude::*};
use crate::models::{AccountRecord, email_key};

/// Accounts created at runtime. Seed accounts never live here.
pub struct AccountRepository {
    conn: DatabaseConnection,
}

impl AccountRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: accounts::Model) -> AccountRecord {
        AccountRecord {
            id: model.id,
            email: model.email,
            name: model.name,
            password: model.password,
            is_admin: model.is_admin,
        }
    }

    pub async fn list(&self) -> Result<Vec<AccountRecord>> {
        let rows = Accounts::find()
            .order_by_asc(accounts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list registered accounts")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    /// Case-insensitive lookup by email.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<AccountRecord>> {
        let row = Accounts::find()
            .filter(accounts::Column::EmailKey.eq(email_key(email)))
            .one(&self.conn)
            .await
            .context("Failed to query account by email")?;

        Ok(row.map(Self::map_model))
    }

    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AccountRecord>> {
        Ok(self
            .get_by_email(email)
            .await?
            .filter(|account| account.password == password))
    }

    /// Inserts a non-admin account unless the email is taken.
    ///
    /// The id is one above the highest registered id, never below
    /// `SEED_ID_CEILING + 1`. Lookup, allocation and insert share one
    /// transaction.
    pub async fn create(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Option<AccountRecord>> {
        let key = email_key(email);
        let txn = self.conn.begin().await?;

        let exists = Accounts::find()
            .filter(accounts::Column::EmailKey.eq(key.as_str()))
            .one(&txn)
            .await?
            .is_some();
        if exists {
            txn.rollback().await?;
            return Ok(None);
        }

        let max_id = Accounts::find()
            .order_by_desc(accounts::Column::Id)
            .one(&txn)
            .await?
            .map_or(SEED_ID_CEILING, |a| a.id.max(SEED_ID_CEILING));
        let id = max_id + 1;

        let model = accounts::ActiveModel {
            id: Set(id),
            email: Set(email.trim().to_string()),
            email_key: Set(key),
            name: Set(name.trim().to_string()),
            password: Set(password.to_string()),
            is_admin: Set(false),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
        };
        let inserted = Accounts::insert(model)
            .exec_with_returning(&txn)
            .await
            .context("Failed to insert account")?;

        txn.commit().await?;

        info!(id, email = %inserted.email, "Registered account");
        Ok(Some(Self::map_model(inserted)))
    }
}
