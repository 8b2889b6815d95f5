//! Add entry command handler

use crate::models::PokemonDraft;
use crate::state::SharedState;

pub async fn cmd_add_pokemon(state: &SharedState, draft: PokemonDraft) -> anyhow::Result<()> {
    match state.pokedex.create(&draft).await {
        Ok(created) => println!("✓ Added: {} (ID: {})", created.name, created.id),
        Err(e) => println!("✗ {}", e.user_message()),
    }
    Ok(())
}
