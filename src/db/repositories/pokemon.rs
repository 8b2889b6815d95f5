use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::entities::{pokemon_entries, prelude::*};
use crate::models::Pokemon;

pub struct PokemonRepository {
    conn: DatabaseConnection,
}

impl PokemonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Model Conversion Helpers
    // ========================================================================

    fn map_model(model: pokemon_entries::Model) -> Pokemon {
        Pokemon {
            id: model.id,
            name: model.name,
            description: model.description,
            types: serde_json::from_str(&model.types).unwrap_or_default(),
            image_url: model.image_url,
            abilities: model.abilities.and_then(|s| serde_json::from_str(&s).ok()),
            wiki_url: model.wiki_url,
        }
    }

    fn to_active_model(id: i32, pokemon: &Pokemon) -> Result<pokemon_entries::ActiveModel> {
        let types = serde_json::to_string(&pokemon.types)?;
        let abilities = pokemon
            .abilities
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(pokemon_entries::ActiveModel {
            id: Set(id),
            name: Set(pokemon.name.clone()),
            description: Set(pokemon.description.clone()),
            types: Set(types),
            image_url: Set(pokemon.image_url.clone()),
            abilities: Set(abilities),
            wiki_url: Set(pokemon.wiki_url.clone()),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
        })
    }

    // ========================================================================
    // Catalog Operations
    // ========================================================================

    pub async fn list(&self) -> Result<Vec<Pokemon>> {
        let rows = PokemonEntries::find()
            .order_by_asc(pokemon_entries::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list pokemon")?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Pokemon>> {
        let row = PokemonEntries::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query pokemon by id")?;

        Ok(row.map(Self::map_model))
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(PokemonEntries::find().count(&self.conn).await?)
    }

    /// Inserts with `id = max + 1` (1 on an empty catalog); the incoming id
    /// is ignored.
    pub async fn add(&self, pokemon: &Pokemon) -> Result<Pokemon> {
        let txn = self.conn.begin().await?;

        let id = PokemonEntries::find()
            .order_by_desc(pokemon_entries::Column::Id)
            .one(&txn)
            .await?
            .map_or(0, |p| p.id)
            + 1;

        let model = Self::to_active_model(id, pokemon)?;
        let inserted = PokemonEntries::insert(model)
            .exec_with_returning(&txn)
            .await
            .context("Failed to insert pokemon")?;

        txn.commit().await?;

        info!(id, name = %inserted.name, "Added pokemon");
        Ok(Self::map_model(inserted))
    }

    /// Replaces every field of the entry with `id`. Returns `false` when no
    /// such entry exists.
    pub async fn update(&self, id: i32, pokemon: &Pokemon) -> Result<bool> {
        let model = Self::to_active_model(id, pokemon)?;

        let result = PokemonEntries::update_many()
            .set(model)
            .filter(pokemon_entries::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update pokemon")?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = PokemonEntries::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete pokemon")?;

        Ok(result.rows_affected > 0)
    }
}
