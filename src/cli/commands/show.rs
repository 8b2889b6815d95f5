//! Show entry command handler

use crate::state::SharedState;

pub async fn cmd_show_pokemon(state: &SharedState, id: i32) -> anyhow::Result<()> {
    let pokemon = match state.pokedex.get(id).await {
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

    println!("#{} {}", pokemon.id, pokemon.name);
    println!("{:-<50}", "");
    println!("{}", pokemon.description);
    println!();

    for kind in pokemon.resolved_types() {
        println!("  Type: {kind} ({})", kind.hex());
    }

    if let Some(abilities) = &pokemon.abilities {
        println!("  Abilities: {}", abilities.join(", "));
    }
    println!("  Image: {}", pokemon.image_url);
    if let Some(wiki) = &pokemon.wiki_url {
        println!("  Wiki: {wiki}");
    }

    Ok(())
}
