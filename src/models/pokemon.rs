use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    #[serde(default)]
    pub id: i32,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "tipos")]
    pub types: Vec<String>,
    #[serde(rename = "imagenUrl")]
    pub image_url: String,
    #[serde(rename = "habilidades", default, skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<String>>,
    #[serde(rename = "wikiUrl", default, skip_serializing_if = "Option::is_none")]
    pub wiki_url: Option<String>,
}

impl Pokemon {
    /// Resolved categories, in the order the tags were given.
    #[must_use]
    pub fn resolved_types(&self) -> Vec<PokemonType> {
        self.types.iter().map(|t| PokemonType::from_name(t)).collect()
    }

    #[must_use]
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }
}

/// Category tags with their display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PokemonType {
    Normal,
    Fuego,
    Agua,
    Planta,
    Electrico,
    Hielo,
    Lucha,
    Veneno,
    Tierra,
    Volador,
    Psiquico,
    Bicho,
    Roca,
    Fantasma,
    Dragon,
    Siniestro,
    Acero,
    Hada,
}

impl PokemonType {
    pub const ALL: [Self; 18] = [
        Self::Normal,
        Self::Fuego,
        Self::Agua,
        Self::Planta,
        Self::Electrico,
        Self::Hielo,
        Self::Lucha,
        Self::Veneno,
        Self::Tierra,
        Self::Volador,
        Self::Psiquico,
        Self::Bicho,
        Self::Roca,
        Self::Fantasma,
        Self::Dragon,
        Self::Siniestro,
        Self::Acero,
        Self::Hada,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Fuego => "FUEGO",
            Self::Agua => "AGUA",
            Self::Planta => "PLANTA",
            Self::Electrico => "ELÉCTRICO",
            Self::Hielo => "HIELO",
            Self::Lucha => "LUCHA",
            Self::Veneno => "VENENO",
            Self::Tierra => "TIERRA",
            Self::Volador => "VOLADOR",
            Self::Psiquico => "PSÍQUICO",
            Self::Bicho => "BICHO",
            Self::Roca => "ROCA",
            Self::Fantasma => "FANTASMA",
            Self::Dragon => "DRAGÓN",
            Self::Siniestro => "SINIESTRO",
            Self::Acero => "ACERO",
            Self::Hada => "HADA",
        }
    }

    /// ARGB display colour.
    #[must_use]
    pub const fn color(&self) -> u32 {
        match self {
            Self::Normal => 0xFFA8_A878,
            Self::Fuego => 0xFFF0_8030,
            Self::Agua => 0xFF68_90F0,
            Self::Planta => 0xFF78_C850,
            Self::Electrico => 0xFFF8_D030,
            Self::Hielo => 0xFF98_D8D8,
            Self::Lucha => 0xFFC0_3028,
            Self::Veneno => 0xFFA0_40A0,
            Self::Tierra => 0xFFE0_C068,
            Self::Volador => 0xFFA8_90F0,
            Self::Psiquico => 0xFFF8_5888,
            Self::Bicho => 0xFFA8_B820,
            Self::Roca => 0xFFB8_A038,
            Self::Fantasma => 0xFF70_5898,
            Self::Dragon => 0xFF70_38F8,
            Self::Siniestro => 0xFF70_5848,
            Self::Acero => 0xFFB8_B8D0,
            Self::Hada => 0xFFEE_99AC,
        }
    }

    /// `#RRGGBB` form of [`Self::color`].
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:06X}", self.color() & 0x00FF_FFFF)
    }

    /// Case-insensitive lookup; unknown tags fall back to `NORMAL`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let wanted = name.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .unwrap_or(Self::Normal)
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw form input for creating or editing a catalog entry.
#[derive(Debug, Clone, Default)]
pub struct PokemonDraft {
    pub name: String,
    pub description: String,
    /// Comma-separated type tags.
    pub types: String,
    pub image_url: String,
    /// Comma-separated abilities.
    pub abilities: String,
    pub wiki_url: String,
}

impl PokemonDraft {
    /// Prefills a draft from an existing entry, lists joined with `", "`.
    #[must_use]
    pub fn from_pokemon(pokemon: &Pokemon) -> Self {
        Self {
            name: pokemon.name.clone(),
            description: pokemon.description.clone(),
            types: pokemon.types.join(", "),
            image_url: pokemon.image_url.clone(),
            abilities: pokemon.abilities.as_deref().unwrap_or_default().join(", "),
            wiki_url: pokemon.wiki_url.clone().unwrap_or_default(),
        }
    }

    /// Builds the entry with `id = 0`; storage assigns the real id on insert.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first missing required field.
    pub fn build(&self) -> Result<Pokemon, String> {
        let types = parse_list(&self.types);
        if self.name.trim().is_empty() {
            return Err("Name is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        if types.is_empty() {
            return Err("At least one type is required".to_string());
        }
        if self.image_url.trim().is_empty() {
            return Err("Image URL is required".to_string());
        }

        let abilities = parse_list(&self.abilities);
        let wiki_url = self.wiki_url.trim();

        Ok(Pokemon {
            id: 0,
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            types,
            image_url: self.image_url.trim().to_string(),
            abilities: (!abilities.is_empty()).then_some(abilities),
            wiki_url: (!wiki_url.is_empty()).then(|| wiki_url.to_string()),
        })
    }
}

/// Splits a comma-separated field, trimming entries and dropping empties.
#[must_use]
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
