//! Sign-in, registration and session command handlers

use std::io::Write;

use crate::services::AuthStatus;
use crate::state::SharedState;

/// Reads a password from stdin after printing `prompt`.
pub fn read_password(prompt: &str) -> anyhow::Result<String> {
    print!("{prompt}");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn print_status(state: &SharedState) {
    if let AuthStatus::Error(message) = state.session.status() {
        println!("✗ {message}");
    }
}

pub async fn cmd_login(
    state: &SharedState,
    email: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_password("Password: ")?,
    };

    match state.session.login(email, &password).await {
        Ok(user) => {
            let role = if user.is_admin { "administrator" } else { "trainer" };
            println!("✓ Welcome, {} ({role})", user.name);
        }
        Err(_) => print_status(state),
    }

    Ok(())
}

pub async fn cmd_register(
    state: &SharedState,
    email: &str,
    name: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let (password, confirm) = match password {
        Some(p) => (p.clone(), p),
        None => (
            read_password("Password: ")?,
            read_password("Confirm password: ")?,
        ),
    };

    match state.session.register(email, &password, &confirm, name).await {
        Ok(user) => {
            println!("✓ Registered {} (ID: {})", user.email, user.id);
            println!("You are now signed in.");
        }
        Err(_) => print_status(state),
    }

    Ok(())
}

pub async fn cmd_reset_password(state: &SharedState, email: &str) -> anyhow::Result<()> {
    if state.session.reset_password(email).await.is_ok() {
        println!("✓ Password reset sent to {email}");
    } else {
        print_status(state);
    }
    Ok(())
}

pub async fn cmd_logout(state: &SharedState) -> anyhow::Result<()> {
    state.session.logout().await;
    println!("Signed out.");
    Ok(())
}

pub fn cmd_whoami(state: &SharedState) {
    match state.session.current_user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            println!(
                "  ID: {} | Role: {}",
                user.id,
                if user.is_admin { "administrator" } else { "trainer" }
            );
        }
        None => {
            println!("Not signed in.");
            println!();
            println!("Sign in with: pokedex login <email>");
        }
    }
}
