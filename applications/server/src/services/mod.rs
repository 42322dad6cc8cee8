/// Server services
pub mod assets;
pub mod auth;
pub mod catalog;

pub use assets::LocalAssetStore;
pub use auth::AuthService;
pub use catalog::CatalogService;
