//! Delete entry command handler

use crate::state::SharedState;

pub async fn cmd_delete_pokemon(state: &SharedState, id: i32, yes: bool) -> anyhow::Result<()> {
    let name = match state.pokedex.get(id).await {
        Ok(Some(pokemon)) => pokemon.name,
        Ok(None) => {
            println!("Pokemon with ID {id} not found.");
            return Ok(());
        }
        Err(e) => {
            println!("✗ {}", e.user_message());
            return Ok(());
        }
    };

    if !yes {
        println!("Delete '{name}' (ID: {id})?");
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match state.pokedex.delete(id).await {
        Ok(true) => println!("✓ Deleted: {name}"),
        Ok(false) => println!("Pokemon with ID {id} was already gone."),
        Err(e) => println!("✗ {}", e.user_message()),
    }

    Ok(())
}
