//! Catalog state holder.
//!
//! Keeps the last loaded catalog list for the front end. Loads are cached for
//! a short window; every successful mutation forces a fresh reload. Mutations
//! require a signed-in administrator.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::models::{Pokemon, PokemonDraft, User};
use crate::services::catalog_service::{CatalogError, CatalogService};
use crate::services::session::SessionState;

pub struct Pokedex {
    catalog: Arc<dyn CatalogService>,
    session: Arc<SessionState>,
    list: watch::Sender<Vec<Pokemon>>,
    loading: watch::Sender<bool>,
    last_load: Mutex<Option<Instant>>,
    ttl: Duration,
}

impl Pokedex {
    #[must_use]
    pub fn new(catalog: Arc<dyn CatalogService>, session: Arc<SessionState>, ttl: Duration) -> Self {
        let (list, _) = watch::channel(Vec::new());
        let (loading, _) = watch::channel(false);
        Self {
            catalog,
            session,
            list,
            loading,
            last_load: Mutex::new(None),
            ttl,
        }
    }

    #[must_use]
    pub fn pokemons(&self) -> Vec<Pokemon> {
        self.list.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Pokemon>> {
        self.list.subscribe()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    fn is_fresh(&self) -> bool {
        if self.list.borrow().is_empty() {
            return false;
        }
        self.last_load
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some_and(|at| at.elapsed() < self.ttl)
    }

    /// Refreshes the list. Without `force`, a load inside the cache window
    /// returns the current list untouched. On failure the previous list stays.
    pub async fn load(&self, force: bool) -> Result<Vec<Pokemon>, CatalogError> {
        if !force && self.is_fresh() {
            debug!("Catalog cache still fresh");
            return Ok(self.pokemons());
        }

        self.loading.send_replace(true);
        let result = self.catalog.list().await;
        self.loading.send_replace(false);

        match result {
            Ok(mut pokemons) => {
                pokemons.sort_by_key(|p| p.id);
                *self.last_load.lock().unwrap_or_else(PoisonError::into_inner) =
                    Some(Instant::now());
                self.list.send_replace(pokemons.clone());
                debug!(count = pokemons.len(), "Catalog loaded");
                Ok(pokemons)
            }
            Err(e) => {
                warn!(error = %e, "Catalog load failed, keeping previous list");
                Err(e)
            }
        }
    }

    /// Looks in the loaded list first, then asks the catalog.
    pub async fn get(&self, id: i32) -> Result<Option<Pokemon>, CatalogError> {
        let cached = self.list.borrow().iter().find(|p| p.id == id).cloned();
        if cached.is_some() {
            return Ok(cached);
        }
        self.catalog.get(id).await
    }

    fn require_admin(&self) -> Result<User, CatalogError> {
        match self.session.current_user() {
            None => Err(CatalogError::Unauthenticated),
            Some(user) if !user.is_admin => Err(CatalogError::Forbidden),
            Some(user) => Ok(user),
        }
    }

    async fn reload_after_change(&self) {
        if let Err(e) = self.load(true).await {
            warn!(error = %e, "Reload after change failed");
        }
    }

    pub async fn create(&self, draft: &PokemonDraft) -> Result<Pokemon, CatalogError> {
        let admin = self.require_admin()?;
        let pokemon = draft.build().map_err(CatalogError::Validation)?;

        let created = self.catalog.add(pokemon).await?;
        info!(id = created.id, name = %created.name, by = %admin.email, "Pokemon added");

        self.reload_after_change().await;
        Ok(created)
    }

    pub async fn update(&self, id: i32, draft: &PokemonDraft) -> Result<Pokemon, CatalogError> {
        let admin = self.require_admin()?;
        let pokemon = draft.build().map_err(CatalogError::Validation)?;

        let updated = self.catalog.update(id, pokemon).await?;
        info!(id, by = %admin.email, "Pokemon updated");

        self.reload_after_change().await;
        Ok(updated)
    }

    /// Returns whether an entry was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
        let admin = self.require_admin()?;

        let removed = self.catalog.delete(id).await?;
        if removed {
            info!(id, by = %admin.email, "Pokemon deleted");
            self.reload_after_change().await;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth_service::{AuthError, AuthService};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[derive(Default)]
    struct MemoryCatalog {
        items: Mutex<Vec<Pokemon>>,
        list_calls: AtomicUsize,
        fail_list: AtomicBool,
    }

    impl MemoryCatalog {
        fn items(&self) -> std::sync::MutexGuard<'_, Vec<Pokemon>> {
            self.items.lock().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl CatalogService for MemoryCatalog {
        async fn list(&self) -> Result<Vec<Pokemon>, CatalogError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(CatalogError::Internal("operation timed out".to_string()));
            }
            Ok(self.items().clone())
        }

        async fn get(&self, id: i32) -> Result<Option<Pokemon>, CatalogError> {
            Ok(self.items().iter().find(|p| p.id == id).cloned())
        }

        async fn add(&self, pokemon: Pokemon) -> Result<Pokemon, CatalogError> {
            let mut items = self.items();
            let id = items.iter().map(|p| p.id).max().unwrap_or(0) + 1;
            let pokemon = pokemon.with_id(id);
            items.push(pokemon.clone());
            Ok(pokemon)
        }

        async fn update(&self, id: i32, pokemon: Pokemon) -> Result<Pokemon, CatalogError> {
            let mut items = self.items();
            let slot = items
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(CatalogError::NotFound(id))?;
            *slot = pokemon.with_id(id);
            Ok(slot.clone())
        }

        async fn delete(&self, id: i32) -> Result<bool, CatalogError> {
            let mut items = self.items();
            let before = items.len();
            items.retain(|p| p.id != id);
            Ok(items.len() != before)
        }
    }

    struct FixedAuth(User);

    #[async_trait::async_trait]
    impl AuthService for FixedAuth {
        async fn login(&self, _: &str, _: &str) -> Result<User, AuthError> {
            Ok(self.0.clone())
        }

        async fn register(&self, _: &str, _: &str, _: &str) -> Result<User, AuthError> {
            Err(AuthError::EmailTaken)
        }

        async fn reset_password(&self, _: &str) -> Result<(), AuthError> {
            Ok(())
        }

        async fn resolve(&self, _: &str) -> Result<Option<User>, AuthError> {
            Ok(Some(self.0.clone()))
        }

        async fn logout(&self) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn draft(name: &str) -> PokemonDraft {
        PokemonDraft {
            name: name.to_string(),
            description: "A test entry".to_string(),
            types: "FUEGO, VOLADOR".to_string(),
            image_url: "https://img.example/x.png".to_string(),
            ..PokemonDraft::default()
        }
    }

    async fn pokedex_as(is_admin: Option<bool>) -> (Pokedex, Arc<MemoryCatalog>) {
        let catalog = Arc::new(MemoryCatalog::default());
        let user = User {
            id: 1,
            email: "admin@pokedex.com".to_string(),
            name: "Admin".to_string(),
            is_admin: is_admin.unwrap_or(false),
        };
        let session = Arc::new(SessionState::new(Arc::new(FixedAuth(user))));
        if is_admin.is_some() {
            session.login("admin@pokedex.com", "x").await.unwrap();
        }
        let pokedex = Pokedex::new(catalog.clone(), session, Duration::from_secs(60));
        (pokedex, catalog)
    }

    #[tokio::test]
    async fn test_mutations_require_admin() {
        let (anonymous, _) = pokedex_as(None).await;
        assert!(matches!(
            anonymous.create(&draft("Charizard")).await,
            Err(CatalogError::Unauthenticated)
        ));

        let (trainer, catalog) = pokedex_as(Some(false)).await;
        assert!(matches!(
            trainer.create(&draft("Charizard")).await,
            Err(CatalogError::Forbidden)
        ));
        assert!(matches!(trainer.delete(1).await, Err(CatalogError::Forbidden)));
        assert!(catalog.items().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_reloads() {
        let (pokedex, _) = pokedex_as(Some(true)).await;

        let first = pokedex.create(&draft("Charizard")).await.unwrap();
        let second = pokedex.create(&draft("Mew")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(
            pokedex.pokemons().iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(first.types, vec!["FUEGO", "VOLADOR"]);
    }

    #[tokio::test]
    async fn test_invalid_draft_is_rejected() {
        let (pokedex, catalog) = pokedex_as(Some(true)).await;
        let err = pokedex.create(&draft("")).await.unwrap_err();
        assert_eq!(err.user_message(), "Name is required");
        assert!(catalog.items().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_changes_nothing() {
        let (pokedex, catalog) = pokedex_as(Some(true)).await;
        pokedex.create(&draft("Charizard")).await.unwrap();

        let err = pokedex.update(42, &draft("Ghost")).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(42)));
        assert_eq!(catalog.items().len(), 1);
        assert_eq!(catalog.items()[0].name, "Charizard");

        let updated = pokedex.update(1, &draft("Mega Charizard")).await.unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(pokedex.pokemons()[0].name, "Mega Charizard");
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let (pokedex, _) = pokedex_as(Some(true)).await;
        pokedex.create(&draft("Charizard")).await.unwrap();

        assert!(pokedex.delete(1).await.unwrap());
        assert!(!pokedex.delete(1).await.unwrap());
        assert!(pokedex.pokemons().is_empty());
    }

    #[tokio::test]
    async fn test_empty_list_is_never_cached() {
        let (pokedex, catalog) = pokedex_as(None).await;
        pokedex.load(false).await.unwrap();
        pokedex.load(false).await.unwrap();
        assert_eq!(catalog.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_is_cached_until_ttl() {
        let (pokedex, catalog) = pokedex_as(None).await;
        catalog.add(draft("Charizard").build().unwrap()).await.unwrap();

        pokedex.load(false).await.unwrap();
        pokedex.load(false).await.unwrap();
        assert_eq!(catalog.list_calls.load(Ordering::SeqCst), 1);

        pokedex.load(true).await.unwrap();
        assert_eq!(catalog.list_calls.load(Ordering::SeqCst), 2);

        tokio::time::advance(Duration::from_secs(61)).await;
        pokedex.load(false).await.unwrap();
        assert_eq!(catalog.list_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_list() {
        let (pokedex, catalog) = pokedex_as(Some(true)).await;
        pokedex.create(&draft("Charizard")).await.unwrap();
        assert_eq!(pokedex.pokemons().len(), 1);

        catalog.fail_list.store(true, Ordering::SeqCst);
        let err = pokedex.load(true).await.unwrap_err();
        assert_eq!(
            err.user_message(),
            "The server took too long to respond. Try again."
        );
        assert_eq!(pokedex.pokemons().len(), 1);
        assert!(!pokedex.is_loading());
    }
}
