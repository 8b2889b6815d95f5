pub mod account;
pub mod pokemon;
