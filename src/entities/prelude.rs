pub use super::accounts::Entity as Accounts;
pub use super::pokemon_entries::Entity as PokemonEntries;
