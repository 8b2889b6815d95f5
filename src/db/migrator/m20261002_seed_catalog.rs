use crate::entities::pokemon_entries::Column;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Copies the bundled catalog into an empty store. Runs once; a catalog that
/// is later emptied by the user stays empty.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let catalog = crate::seed::catalog().map_err(|e| DbErr::Custom(e.to_string()))?;
        if catalog.is_empty() {
            return Ok(());
        }

        let now = chrono::Utc::now().to_rfc3339();
        let mut insert = Query::insert()
            .into_table(PokemonEntries)
            .columns([
                Column::Id,
                Column::Name,
                Column::Description,
                Column::Types,
                Column::ImageUrl,
                Column::Abilities,
                Column::WikiUrl,
                Column::UpdatedAt,
            ])
            .to_owned();

        for pokemon in catalog {
            let types = serde_json::to_string(&pokemon.types)
                .map_err(|e| DbErr::Custom(e.to_string()))?;
            let abilities = pokemon
                .abilities
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(|e| DbErr::Custom(e.to_string()))?;

            insert.values_panic([
                pokemon.id.into(),
                pokemon.name.into(),
                pokemon.description.into(),
                types.into(),
                pokemon.image_url.into(),
                abilities.into(),
                pokemon.wiki_url.into(),
                now.clone().into(),
            ]);
        }

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete().from_table(PokemonEntries).to_owned();
        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
