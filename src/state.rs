use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::clients::backend::BackendClient;
use crate::clients::build_http_client;
use crate::clients::identity::HttpIdentityProvider;
use crate::config::{BackendMode, Config};
use crate::db::Store;
use crate::services::{
    AuthService, CatalogService, LocalAuthService, LocalCatalogService, Pokedex,
    RemoteAuthService, RemoteCatalogService, SessionFile, SessionState,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    /// Present only in local mode.
    pub store: Option<Store>,

    pub session: Arc<SessionState>,

    pub pokedex: Arc<Pokedex>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (store, auth, catalog): (Option<Store>, Arc<dyn AuthService>, Arc<dyn CatalogService>) =
            match config.backend.mode {
                BackendMode::Local => {
                    let store = Store::new(&config.general.database_path).await?;
                    info!(path = %config.general.database_path, "Using local record store");
                    (
                        Some(store.clone()),
                        Arc::new(LocalAuthService::new(store.clone())),
                        Arc::new(LocalCatalogService::new(store)),
                    )
                }
                BackendMode::Remote => {
                    let http_client = build_http_client(&config.backend)?;
                    let backend =
                        BackendClient::with_shared_client(http_client.clone(), &config.backend.base_url)?;
                    let identity = Arc::new(HttpIdentityProvider::with_shared_client(
                        http_client,
                        &config.identity.base_url,
                        &config.identity.api_key,
                    )?);
                    info!(url = %backend.base_url(), "Using remote backend");
                    (
                        None,
                        Arc::new(RemoteAuthService::new(identity, backend.clone())),
                        Arc::new(RemoteCatalogService::new(backend)),
                    )
                }
            };

        let mut session = SessionState::new(auth);
        if config.session.persist {
            session = session
                .with_session_file(SessionFile::new(&config.session.path))
                .await;
        }
        let session = Arc::new(session);

        let pokedex = Arc::new(Pokedex::new(
            catalog,
            session.clone(),
            Duration::from_secs(config.catalog.cache_ttl_seconds),
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            session,
            pokedex,
        })
    }
}
