//! Export catalog command handler

use anyhow::Context;
use std::path::Path;

use crate::state::SharedState;

/// Writes the catalog in the seed file format, to `path` or stdout.
pub async fn cmd_export(state: &SharedState, path: Option<&str>) -> anyhow::Result<()> {
    let pokemons = state.pokedex.load(true).await?;
    let json = serde_json::to_string_pretty(&pokemons)?;

    match path {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Exported {} entries to {}", pokemons.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
