pub mod prelude;

pub mod accounts;
pub mod pokemon_entries;
