pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod seed;
pub mod services;
pub mod state;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use state::SharedState;

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config.general.log_level);

    let Some(command) = cli.command else {
        print_help();
        return Ok(());
    };

    if matches!(command, Commands::Init) {
        if Config::create_default_if_missing()? {
            println!("✓ Created config.toml with defaults");
        } else {
            println!("config.toml already exists");
        }
        return Ok(());
    }

    if matches!(command, Commands::Types) {
        cli::cmd_types();
        return Ok(());
    }

    let state = SharedState::new(config).await?;
    debug!(remote = state.config.is_remote(), "State initialised");

    match command {
        Commands::Login { email, password } => cli::cmd_login(&state, &email, password).await,
        Commands::Register {
            email,
            name,
            password,
        } => cli::cmd_register(&state, &email, &name, password).await,
        Commands::ResetPassword { email } => cli::cmd_reset_password(&state, &email).await,
        Commands::Logout => cli::cmd_logout(&state).await,
        Commands::Whoami => {
            cli::cmd_whoami(&state);
            Ok(())
        }
        Commands::List { refresh } => cli::cmd_list_pokemon(&state, refresh).await,
        Commands::Show { id } => cli::cmd_show_pokemon(&state, id).await,
        Commands::Add(entry) => cli::cmd_add_pokemon(&state, entry.into()).await,
        Commands::Update { id, changes } => cli::cmd_update_pokemon(&state, id, changes).await,
        Commands::Delete { id, yes } => cli::cmd_delete_pokemon(&state, id, yes).await,
        Commands::Export { path } => cli::cmd_export(&state, path.as_deref()).await,
        Commands::Init | Commands::Types => Ok(()),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Pokedex v{}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!("Pokedex - a Pokémon catalog behind a login wall");
    println!();
    println!("USAGE:");
    println!("  pokedex <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("  init                        Create default config file");
    println!("  login <email> [-p pw]       Sign in");
    println!("  register <email> --name n   Create an account and sign in");
    println!("  reset-password <email>      Send a password reset");
    println!("  logout                      Sign out");
    println!("  whoami                      Show the signed-in user");
    println!("  list [--refresh]            List the catalog");
    println!("  show <id>                   Show one entry");
    println!("  add --name ... --types ...  Add an entry (admin)");
    println!("  update <id> [--name ...]    Edit an entry (admin)");
    println!("  delete <id> [-y]            Delete an entry (admin)");
    println!("  export [path]               Dump the catalog as JSON");
    println!("  types                       List types and colours");
    println!();
    println!("Run 'pokedex help <command>' for details.");
}
