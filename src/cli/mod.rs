//! Command-line front end for the Pokédex.

mod commands;

use clap::{Args, Parser, Subcommand};

use crate::models::PokemonDraft;

/// Pokédex - a Pokémon catalog behind a login wall
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Sign in with email and password
    Login {
        email: String,
        /// Prompted for when omitted
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Create a trainer account and sign in
    Register {
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        #[arg(long, short)]
        password: Option<String>,
    },

    /// Send a password reset for an email
    ResetPassword { email: String },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List the catalog
    #[command(alias = "ls", alias = "l")]
    List {
        /// Skip the cache window
        #[arg(long)]
        refresh: bool,
    },

    /// Show details of one entry
    #[command(alias = "i")]
    Show { id: i32 },

    /// Add an entry (administrators only)
    #[command(alias = "a")]
    Add(EntryArgs),

    /// Edit an entry; omitted fields keep their current value (administrators only)
    Update {
        id: i32,
        #[command(flatten)]
        changes: EntryChanges,
    },

    /// Delete an entry (administrators only)
    #[command(alias = "rm")]
    Delete {
        id: i32,
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Write the catalog as JSON to a file or stdout
    Export { path: Option<String> },

    /// List the known types and their colours
    Types,
}

/// Entry fields; lists are comma-separated.
#[derive(Args)]
pub struct EntryArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: String,

    /// e.g. "FUEGO, VOLADOR"
    #[arg(long)]
    pub types: String,

    #[arg(long)]
    pub image_url: String,

    #[arg(long, default_value = "")]
    pub abilities: String,

    #[arg(long, default_value = "")]
    pub wiki_url: String,
}

impl From<EntryArgs> for PokemonDraft {
    fn from(args: EntryArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            types: args.types,
            image_url: args.image_url,
            abilities: args.abilities,
            wiki_url: args.wiki_url,
        }
    }
}

/// Fields to change on an existing entry. Pass an empty string to clear an
/// optional field.
#[derive(Args, Default)]
pub struct EntryChanges {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub types: Option<String>,

    #[arg(long)]
    pub image_url: Option<String>,

    #[arg(long)]
    pub abilities: Option<String>,

    #[arg(long)]
    pub wiki_url: Option<String>,
}

impl EntryChanges {
    /// Overwrites the fields of `draft` that were given.
    pub fn apply(self, draft: &mut PokemonDraft) {
        let fields = [
            (self.name, &mut draft.name),
            (self.description, &mut draft.description),
            (self.types, &mut draft.types),
            (self.image_url, &mut draft.image_url),
            (self.abilities, &mut draft.abilities),
            (self.wiki_url, &mut draft.wiki_url),
        ];
        for (change, field) in fields {
            if let Some(value) = change {
                *field = value;
            }
        }
    }
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pokemon;

    #[test]
    fn test_changes_keep_unspecified_fields() {
        let existing = Pokemon {
            id: 4,
            name: "Charmander".to_string(),
            description: "Lizard".to_string(),
            types: vec!["FUEGO".to_string()],
            image_url: "https://img.example/4.png".to_string(),
            abilities: Some(vec!["Mar Llamas".to_string()]),
            wiki_url: Some("https://wiki.example/4".to_string()),
        };
        let mut draft = PokemonDraft::from_pokemon(&existing);

        EntryChanges {
            name: Some("Charmeleon".to_string()),
            wiki_url: Some(String::new()),
            ..EntryChanges::default()
        }
        .apply(&mut draft);

        let updated = draft.build().unwrap();
        assert_eq!(updated.name, "Charmeleon");
        assert_eq!(updated.description, "Lizard");
        assert_eq!(updated.types, vec!["FUEGO"]);
        assert_eq!(updated.abilities, Some(vec!["Mar Llamas".to_string()]));
        assert!(updated.wiki_url.is_none());
    }

    #[test]
    fn test_update_flags_are_optional() {
        let cli = Cli::try_parse_from(["pokedex", "update", "25", "--name", "Raichu"]).unwrap();
        let Some(Commands::Update { id, changes }) = cli.command else {
            panic!("expected update command");
        };
        assert_eq!(id, 25);
        assert_eq!(changes.name.as_deref(), Some("Raichu"));
        assert!(changes.types.is_none());
    }
}
