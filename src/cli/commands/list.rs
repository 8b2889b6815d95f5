//! List catalog command handler

use crate::models::PokemonType;
use crate::state::SharedState;

pub async fn cmd_list_pokemon(state: &SharedState, refresh: bool) -> anyhow::Result<()> {
    let pokemons = match state.pokedex.load(refresh).await {
        Ok(list) => list,
        Err(e) => {
            println!("✗ {}", e.user_message());
            return Ok(());
        }
    };

    if pokemons.is_empty() {
        println!("The catalog is empty.");
        println!();
        println!("Add entries with: pokedex add --name ... (administrators only)");
        return Ok(());
    }

    println!("Pokédex ({} total)", pokemons.len());
    println!("{:-<70}", "");

    for pokemon in pokemons {
        let types = pokemon
            .resolved_types()
            .iter()
            .map(PokemonType::as_str)
            .collect::<Vec<_>>()
            .join(" / ");

        println!("#{:<4} {:<20} {}", pokemon.id, pokemon.name, types);
    }

    Ok(())
}
