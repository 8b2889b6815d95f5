use anyhow::{Context, Result, bail};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{endpoint, parse_base_url};
use crate::models::{Pokemon, User};

const USERS: &str = "usuarios";
const POKEMONS: &str = "pokemons";

/// Client for the remote record API.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn with_shared_client(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn expect_json<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("{action} failed: status={status}, body={body}");
        }

        response
            .json()
            .await
            .with_context(|| format!("{action}: failed to parse response"))
    }

    /// `None` when the backend has no user with that email.
    pub async fn get_user(&self, email: &str) -> Result<Option<User>> {
        let url = endpoint(&self.base_url, &[USERS, email])?;
        debug!(%url, "Fetching user");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach backend")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Self::expect_json(response, "Fetch user").await.map(Some)
    }

    pub async fn create_user(&self, user: &User) -> Result<User> {
        let url = endpoint(&self.base_url, &[USERS])?;
        debug!(%url, email = %user.email, "Creating user");

        let response = self
            .client
            .post(url)
            .json(user)
            .send()
            .await
            .context("Failed to reach backend")?;

        Self::expect_json(response, "Create user").await
    }

    pub async fn get_pokemons(&self) -> Result<Vec<Pokemon>> {
        let url = endpoint(&self.base_url, &[POKEMONS])?;
        debug!(%url, "Fetching pokemon list");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach backend")?;

        Self::expect_json(response, "List pokemon").await
    }

    pub async fn create_pokemon(&self, pokemon: &Pokemon) -> Result<Pokemon> {
        let url = endpoint(&self.base_url, &[POKEMONS])?;

        let response = self
            .client
            .post(url)
            .json(pokemon)
            .send()
            .await
            .context("Failed to reach backend")?;

        Self::expect_json(response, "Create pokemon").await
    }

    /// `None` when the backend reports the id as missing.
    pub async fn update_pokemon(&self, id: i32, pokemon: &Pokemon) -> Result<Option<Pokemon>> {
        let url = endpoint(&self.base_url, &[POKEMONS, &id.to_string()])?;

        let response = self
            .client
            .put(url)
            .json(pokemon)
            .send()
            .await
            .context("Failed to reach backend")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Self::expect_json(response, "Update pokemon").await.map(Some)
    }

    /// `false` when the backend reports the id as missing.
    pub async fn delete_pokemon(&self, id: i32) -> Result<bool> {
        let url = endpoint(&self.base_url, &[POKEMONS, &id.to_string()])?;

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .context("Failed to reach backend")?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Delete pokemon failed: status={status}, body={body}");
        }

        Ok(true)
    }
}
