//! Integration tests for the local record store and the services over it.

use pokedex::db::Store;
use pokedex::models::{AccountRecord, Pokemon};
use pokedex::services::{
    AuthError, AuthService, CatalogError, CatalogService, LocalAuthService, LocalCatalogService,
};

async fn temp_store(name: &str) -> Store {
    let db_path =
        std::env::temp_dir().join(format!("pokedex-{name}-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to open store")
}

fn seed(id: i32, email: &str, password: &str, is_admin: bool) -> AccountRecord {
    AccountRecord {
        id,
        email: email.to_string(),
        name: format!("User {id}"),
        password: password.to_string(),
        is_admin,
    }
}

fn entry(name: &str) -> Pokemon {
    Pokemon {
        id: 0,
        name: name.to_string(),
        description: format!("{name} description"),
        types: vec!["AGUA".to_string()],
        image_url: format!("https://img.example/{name}.png"),
        abilities: None,
        wiki_url: None,
    }
}

#[tokio::test]
async fn test_credentials_ignore_email_case() {
    let store = temp_store("credentials")
        .await
        .with_seed_accounts(vec![seed(1, "a@x.com", "p", true)]);
    store.ping().await.unwrap();

    let found = store.validate_credentials("A@X.COM", "p").await.unwrap();
    assert_eq!(found.map(|a| a.id), Some(1));

    assert!(store.validate_credentials("a@x.com", "wrong").await.unwrap().is_none());
    assert!(store.validate_credentials("b@x.com", "p").await.unwrap().is_none());
}

#[tokio::test]
async fn test_registered_ids_start_after_seed_range() {
    let store = temp_store("register-ids")
        .await
        .with_seed_accounts(vec![seed(1, "a@x.com", "p", true)]);

    let first = store
        .register_account("new@x.com", "pw", "New")
        .await
        .unwrap()
        .unwrap();
    let second = store
        .register_account("other@x.com", "pw", "Other")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(first.id, 101);
    assert_eq!(second.id, 102);
    assert!(!first.is_admin);
}

#[tokio::test]
async fn test_duplicate_registration_leaves_store_unchanged() {
    let store = temp_store("register-dup")
        .await
        .with_seed_accounts(vec![seed(1, "a@x.com", "p", true)]);

    store
        .register_account("new@x.com", "pw", "New")
        .await
        .unwrap()
        .unwrap();
    let before = store.all_accounts().await.unwrap();

    assert!(store.register_account("NEW@x.com", "pw2", "Dup").await.unwrap().is_none());
    assert!(store.register_account("A@X.com", "pw2", "Dup").await.unwrap().is_none());

    assert_eq!(store.all_accounts().await.unwrap(), before);
}

#[tokio::test]
async fn test_local_auth_flow() {
    let store = temp_store("auth")
        .await
        .with_seed_accounts(vec![seed(1, "admin@x.com", "admin", true)]);
    let auth = LocalAuthService::new(store);

    let admin = auth.login("ADMIN@x.com", "admin").await.unwrap();
    assert_eq!(admin.id, 1);
    assert!(admin.is_admin);

    assert!(matches!(
        auth.login("admin@x.com", "nope").await,
        Err(AuthError::InvalidCredentials)
    ));

    let user = auth.register("ash@x.com", "pikachu", "Ash").await.unwrap();
    assert_eq!(user.id, 101);
    assert_eq!(auth.login("ash@x.com", "pikachu").await.unwrap(), user);

    assert!(matches!(
        auth.register("ash@x.com", "x", "Again").await,
        Err(AuthError::EmailTaken)
    ));

    auth.reset_password("ash@x.com").await.unwrap();
    assert!(matches!(
        auth.reset_password("ghost@x.com").await,
        Err(AuthError::UserNotFound)
    ));
}

#[tokio::test]
async fn test_seed_catalog_is_imported_once() {
    let store = temp_store("catalog-seed").await;
    let list = store.list_pokemon().await.unwrap();
    assert!(!list.is_empty());
    assert_eq!(store.pokemon_count().await.unwrap(), list.len() as u64);
    assert!(list.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(list.first().map(|p| p.name.as_str()), Some("Bulbasaur"));
}

#[tokio::test]
async fn test_add_assigns_max_plus_one() {
    let catalog = LocalCatalogService::new(temp_store("catalog-add").await);
    let before = catalog.list().await.unwrap();
    let max = before.iter().map(|p| p.id).max().unwrap_or(0);

    let added = catalog.add(entry("Mew")).await.unwrap();
    assert_eq!(added.id, max + 1);

    let after = catalog.list().await.unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.iter().filter(|p| p.name == "Mew").count(), 1);
}

#[tokio::test]
async fn test_add_to_empty_catalog_starts_at_one() {
    let catalog = LocalCatalogService::new(temp_store("catalog-empty").await);
    for pokemon in catalog.list().await.unwrap() {
        assert!(catalog.delete(pokemon.id).await.unwrap());
    }

    let added = catalog.add(entry("Mew")).await.unwrap();
    assert_eq!(added.id, 1);
}

#[tokio::test]
async fn test_update_absent_and_present() {
    let catalog = LocalCatalogService::new(temp_store("catalog-update").await);
    let before = catalog.list().await.unwrap();

    assert!(matches!(
        catalog.update(9999, entry("Ghost")).await,
        Err(CatalogError::NotFound(9999))
    ));
    assert_eq!(catalog.list().await.unwrap(), before);

    let target = before[0].id;
    let mut changed = entry("Renamed");
    changed.abilities = Some(vec!["Espesura".to_string()]);
    changed.wiki_url = Some("https://wiki.example/renamed".to_string());

    let updated = catalog.update(target, changed).await.unwrap();
    assert_eq!(updated.id, target);

    let stored = catalog.get(target).await.unwrap().unwrap();
    assert_eq!(stored, updated);
    assert_eq!(stored.abilities, Some(vec!["Espesura".to_string()]));

    let after = catalog.list().await.unwrap();
    assert_eq!(after.len(), before.len());
    assert_eq!(after.iter().filter(|p| p.id == target).count(), 1);
    assert_eq!(after.iter().find(|p| p.id == target), Some(&updated));
    for (old, new) in before.iter().zip(&after).filter(|(p, _)| p.id != target) {
        assert_eq!(old, new);
    }
}

#[tokio::test]
async fn test_delete_absent_and_present() {
    let catalog = LocalCatalogService::new(temp_store("catalog-delete").await);
    let before = catalog.list().await.unwrap();

    assert!(!catalog.delete(9999).await.unwrap());
    assert_eq!(catalog.list().await.unwrap(), before);

    let target = before[0].id;
    assert!(catalog.delete(target).await.unwrap());
    let after = catalog.list().await.unwrap();
    assert!(after.iter().all(|p| p.id != target));
    assert_eq!(after.len(), before.len() - 1);
}
