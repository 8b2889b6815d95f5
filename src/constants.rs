pub mod seed {

    pub const ACCOUNTS_FILE: &str = "usuarios.json";

    pub const CATALOG_FILE: &str = "pokemons.json";
}

pub mod accounts {

    /// Seed accounts use ids `1..=SEED_ID_CEILING`; registered ones start above it.
    pub const SEED_ID_CEILING: i32 = 100;
}

pub mod cache {

    pub const CATALOG_TTL_SECONDS: u64 = 60;
}

pub mod http {

    pub const DEFAULT_BASE_URL: &str = "https://backend-pokemon-pm59.onrender.com/";

    pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1/";

    pub const TIMEOUT_SECONDS: u64 = 30;

    pub const USER_AGENT: &str = "Pokedex/1.0";
}
