use crate::models::PokemonType;

pub fn cmd_types() {
    for kind in PokemonType::ALL {
        println!("{:<10} {}", kind.as_str(), kind.hex());
    }
}
