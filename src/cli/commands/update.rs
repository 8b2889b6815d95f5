//! Update entry command handler

use crate::cli::EntryChanges;
use crate::models::PokemonDraft;
use crate::state::SharedState;

/// Prefills the form from the stored entry, then applies `changes`.
pub async fn cmd_update_pokemon(
    state: &SharedState,
    id: i32,
    changes: EntryChanges,
) -> anyhow::Result<()> {
    let existing = match state.pokedex.get(id).await {
        Ok(Some(pokemon)) => pokemon,
        Ok(None) => {
            println!("Pokemon with ID {id} not found.");
            println!("Use 'pokedex list' to see IDs.");
            return Ok(());
        }
        Err(e) => {
            println!("✗ {}", e.user_message());
            return Ok(());
        }
    };

    let mut draft = PokemonDraft::from_pokemon(&existing);
    changes.apply(&mut draft);

    match state.pokedex.update(id, &draft).await {
        Ok(updated) => println!("✓ Updated: {} (ID: {})", updated.name, updated.id),
        Err(e) => println!("✗ {}", e.user_message()),
    }
    Ok(())
}
