//! `CatalogService` implementations: the local `SQLite` store and the remote
//! record API.

use async_trait::async_trait;
use tracing::info;

use crate::clients::backend::BackendClient;
use crate::db::Store;
use crate::models::Pokemon;
use crate::services::catalog_service::{CatalogError, CatalogService};

pub struct LocalCatalogService {
    store: Store,
}

impl LocalCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CatalogService for LocalCatalogService {
    async fn list(&self) -> Result<Vec<Pokemon>, CatalogError> {
        Ok(self.store.list_pokemon().await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Pokemon>, CatalogError> {
        Ok(self.store.get_pokemon(id).await?)
    }

    async fn add(&self, pokemon: Pokemon) -> Result<Pokemon, CatalogError> {
        Ok(self.store.add_pokemon(&pokemon).await?)
    }

    async fn update(&self, id: i32, pokemon: Pokemon) -> Result<Pokemon, CatalogError> {
        if self.store.update_pokemon(id, &pokemon).await? {
            info!(id, "Updated pokemon");
            Ok(pokemon.with_id(id))
        } else {
            Err(CatalogError::NotFound(id))
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
        let removed = self.store.delete_pokemon(id).await?;
        if removed {
            info!(id, "Deleted pokemon");
        }
        Ok(removed)
    }
}

pub struct RemoteCatalogService {
    client: BackendClient,
}

impl RemoteCatalogService {
    #[must_use]
    pub const fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogService for RemoteCatalogService {
    async fn list(&self) -> Result<Vec<Pokemon>, CatalogError> {
        let mut pokemons = self.client.get_pokemons().await?;
        pokemons.sort_by_key(|p| p.id);
        Ok(pokemons)
    }

    async fn get(&self, id: i32) -> Result<Option<Pokemon>, CatalogError> {
        let pokemons = self.client.get_pokemons().await?;
        Ok(pokemons.into_iter().find(|p| p.id == id))
    }

    async fn add(&self, pokemon: Pokemon) -> Result<Pokemon, CatalogError> {
        let created = self.client.create_pokemon(&pokemon).await?;
        info!(id = created.id, "Created remote pokemon");
        Ok(created)
    }

    async fn update(&self, id: i32, pokemon: Pokemon) -> Result<Pokemon, CatalogError> {
        self.client
            .update_pokemon(id, &pokemon.with_id(id))
            .await?
            .ok_or(CatalogError::NotFound(id))
    }

    async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
        Ok(self.client.delete_pokemon(id).await?)
    }
}
