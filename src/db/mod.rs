use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::models::{AccountRecord, Pokemon};

pub mod migrator;
pub mod repositories;

/// Local record store: bundled seed accounts in memory, registered accounts
/// and the catalog in `SQLite`.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    seeds: Arc<Vec<AccountRecord>>,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every connection to `:memory:` opens its own database.
        let max_connections = if in_memory { 1 } else { max_connections };
        let min_connections = min_connections.min(max_connections);

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            seeds: Arc::new(crate::seed::accounts().to_vec()),
        })
    }

    /// Replaces the bundled seed accounts.
    #[must_use]
    pub fn with_seed_accounts(mut self, seeds: Vec<AccountRecord>) -> Self {
        self.seeds = Arc::new(seeds);
        self
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn account_repo(&self) -> repositories::account::AccountRepository {
        repositories::account::AccountRepository::new(self.conn.clone())
    }

    fn pokemon_repo(&self) -> repositories::pokemon::PokemonRepository {
        repositories::pokemon::PokemonRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Accounts (seed ++ registered)
    // ========================================================================

    pub async fn registered_accounts(&self) -> Result<Vec<AccountRecord>> {
        self.account_repo().list().await
    }

    pub async fn all_accounts(&self) -> Result<Vec<AccountRecord>> {
        let mut all = self.seeds.to_vec();
        all.extend(self.registered_accounts().await?);
        Ok(all)
    }

    /// Seed accounts win over registered ones.
    pub async fn find_account_by_email(&self, email: &str) -> Result<Option<AccountRecord>> {
        if let Some(seed) = self.seeds.iter().find(|a| a.has_email(email)) {
            return Ok(Some(seed.clone()));
        }
        self.account_repo().get_by_email(email).await
    }

    pub async fn validate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AccountRecord>> {
        if let Some(seed) = self.seeds.iter().find(|a| a.matches(email, password)) {
            return Ok(Some(seed.clone()));
        }
        self.account_repo().verify_credentials(email, password).await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        Ok(self.find_account_by_email(email).await?.is_some())
    }

    /// Returns `None` when the email is already used by any account.
    pub async fn register_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Option<AccountRecord>> {
        if self.seeds.iter().any(|a| a.has_email(email)) {
            return Ok(None);
        }
        self.account_repo().create(email, password, name).await
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    pub async fn list_pokemon(&self) -> Result<Vec<Pokemon>> {
        self.pokemon_repo().list().await
    }

    pub async fn get_pokemon(&self, id: i32) -> Result<Option<Pokemon>> {
        self.pokemon_repo().get(id).await
    }

    pub async fn pokemon_count(&self) -> Result<u64> {
        self.pokemon_repo().count().await
    }

    pub async fn add_pokemon(&self, pokemon: &Pokemon) -> Result<Pokemon> {
        self.pokemon_repo().add(pokemon).await
    }

    pub async fn update_pokemon(&self, id: i32, pokemon: &Pokemon) -> Result<bool> {
        self.pokemon_repo().update(id, pokemon).await
    }

    pub async fn delete_pokemon(&self, id: i32) -> Result<bool> {
        self.pokemon_repo().delete(id).await
    }
}
