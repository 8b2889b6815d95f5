pub mod account;
pub mod pokemon;

pub use account::{AccountRecord, User, email_key};
pub use pokemon::{Pokemon, PokemonDraft, PokemonType, parse_list};
