pub mod catalog;
pub mod postgres;

pub use catalog::{CatalogStore, PgCatalogStore};
pub use postgres::create_pool;
