pub mod messages;
pub use messages::friendly_message;

pub mod auth_service;
pub use auth_service::{AuthError, AuthService};

pub mod auth_service_impl;
pub use auth_service_impl::LocalAuthService;

pub mod remote_auth_service_impl;
pub use remote_auth_service_impl::RemoteAuthService;

pub mod catalog_service;
pub use catalog_service::{CatalogError, CatalogService};

pub mod catalog_service_impl;
pub use catalog_service_impl::{LocalCatalogService, RemoteCatalogService};

pub mod session;
pub use session::{AuthStatus, SessionFile, SessionState};

pub mod pokedex;
pub use pokedex::Pokedex;
