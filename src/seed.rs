//! Seed records bundled into the binary.
//!
//! Seed accounts are immutable at runtime; the seed catalog is only copied
//! into storage the first time an empty catalog is opened.

use anyhow::{Context, Result};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::sync::OnceLock;

use crate::constants::seed::{ACCOUNTS_FILE, CATALOG_FILE};
use crate::models::{AccountRecord, Pokemon};

#[derive(RustEmbed)]
#[folder = "assets/"]
struct SeedAssets;

static SEED_ACCOUNTS: OnceLock<Vec<AccountRecord>> = OnceLock::new();

fn load<T: DeserializeOwned>(name: &str) -> Result<Vec<T>> {
    let file = SeedAssets::get(name).with_context(|| format!("Missing bundled asset: {name}"))?;
    serde_json::from_slice(&file.data).with_context(|| format!("Failed to parse bundled asset: {name}"))
}

/// Bundled accounts, parsed once on first access.
///
/// An unreadable asset yields an empty list so that registered accounts
/// still work.
pub fn accounts() -> &'static [AccountRecord] {
    SEED_ACCOUNTS.get_or_init(|| {
        load(ACCOUNTS_FILE).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Seed accounts unavailable");
            Vec::new()
        })
    })
}

/// Bundled starting catalog.
pub fn catalog() -> Result<Vec<Pokemon>> {
    load(CATALOG_FILE)
}
