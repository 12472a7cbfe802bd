//! Database access layer.
//!
//! - Connection provider: one short-lived pool per schema request
//! - Catalog query layer: typed catalog rows for one schema

pub mod catalog;
pub mod pool;

pub use catalog::{CatalogProvider, CatalogSource, PgCatalog};
pub use pool::ConnectionProvider;
