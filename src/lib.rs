pub mod app;
pub mod client;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::product_service::{ApiError, ProductService};
pub use client::{ClientState, ProductApi, ProductSession};
pub use domain::product::{validate, Product, ProductFields, ProductId, ValidatedProduct};
pub use storage::{InMemoryProductStore, PgProductStore, ProductStore};
