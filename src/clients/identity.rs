//! Email/password identity provider.
//!
//! Speaks an Identity-Toolkit style REST API: `accounts:signUp`,
//! `accounts:signInWithPassword`, `accounts:sendOobCode` and
//! `accounts:delete`, each authorised with `?key=<api key>`. Failures come
//! back as `{"error":{"message":"EMAIL_EXISTS"}}`; the message code is
//! surfaced verbatim so callers can map it to user-facing text.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

use super::{endpoint, parse_base_url};

/// Identity issued by the provider after sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySession {
    pub local_id: String,
    pub email: String,
    pub id_token: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn create_account(&self, email: &str, password: &str) -> Result<IdentitySession>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession>;

    async fn send_password_reset(&self, email: &str) -> Result<()>;

    /// Removes the identity behind `session`.
    async fn delete_account(&self, session: &IdentitySession) -> Result<()>;

    /// Forgets the current identity locally.
    async fn sign_out(&self);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobRequest<'a> {
    request_type: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct HttpIdentityProvider {
    client: Client,
    base_url: Url,
    api_key: String,
    current: RwLock<Option<IdentitySession>>,
}

impl HttpIdentityProvider {
    pub fn with_shared_client(client: Client, base_url: &str, api_key: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
            api_key: api_key.to_string(),
            current: RwLock::new(None),
        })
    }

    async fn call<B: Serialize + Sync>(&self, action: &str, body: &B) -> Result<reqwest::Response> {
        let mut url = endpoint(&self.base_url, &[action])?;
        url.query_pairs_mut().append_pair("key", &self.api_key);

        debug!(action, "Calling identity provider");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .context("Failed to reach identity provider")?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => bail!("{}", envelope.error.message),
            Err(_) => bail!("Identity provider error: status={status}, body={text}"),
        }
    }

    async fn password_call(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let session: IdentitySession = self
            .call(action, &request)
            .await?
            .json()
            .await
            .context("Failed to parse identity response")?;

        *self.current.write().await = Some(session.clone());
        Ok(session)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<IdentitySession> {
        let session = self.password_call("accounts:signUp", email, password).await?;
        info!(email = %session.email, "Identity created");
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession> {
        self.password_call("accounts:signInWithPassword", email, password)
            .await
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        let request = OobRequest {
            request_type: "PASSWORD_RESET",
            email,
        };
        self.call("accounts:sendOobCode", &request).await?;
        info!(%email, "Password reset email requested");
        Ok(())
    }

    async fn delete_account(&self, session: &IdentitySession) -> Result<()> {
        let request = DeleteRequest {
            id_token: &session.id_token,
        };
        self.call("accounts:delete", &request).await?;

        let mut current = self.current.write().await;
        if current.as_ref().is_some_and(|c| c.local_id == session.local_id) {
            *current = None;
        }
        Ok(())
    }

    async fn sign_out(&self) {
        *self.current.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> HttpIdentityProvider {
        HttpIdentityProvider::with_shared_client(Client::new(), &server.uri(), "k").unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_sets_current() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts:signInWithPassword"))
            .and(query_param("key", "k"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "localId": "uid-1",
                "email": "ash@pokedex.com",
                "idToken": "tok"
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let session = provider.sign_in("ash@pokedex.com", "pikachu").await.unwrap();
        assert_eq!(session.local_id, "uid-1");
        assert_eq!(*provider.current.read().await, Some(session));

        provider.sign_out().await;
        assert!(provider.current.read().await.is_none());
    }

    #[tokio::test]
    async fn test_error_code_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 400, "message": "EMAIL_EXISTS" }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .create_account("ash@pokedex.com", "pikachu")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "EMAIL_EXISTS");
    }

    #[tokio::test]
    async fn test_password_reset_request_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts:sendOobCode"))
            .and(body_partial_json(serde_json::json!({
                "requestType": "PASSWORD_RESET",
                "email": "misty@pokedex.com"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "email": "misty@pokedex.com"
            })))
            .expect(1)
            .mount(&server)
            .await;

        provider_for(&server)
            .send_password_reset("misty@pokedex.com")
            .await
            .unwrap();
    }
}
