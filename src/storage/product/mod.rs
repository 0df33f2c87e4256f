//! Persistence for product records.
//!
//! Every operation touches a single record and is atomic on its own; there are no
//! multi-record transactions. Absence of a record is not an error: `update_by_id`
//! returns `None` and `delete_by_id` returns `false`, and the service turns those into
//! a not-found outcome.

use crate::domain::product::{Product, ProductId, ValidatedProduct};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PgProductStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Returns every stored product, in insertion order.
    async fn list_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Assigns a fresh id, stores the record and returns it.
    async fn create(&self, product: ValidatedProduct) -> Result<Product, StoreError>;

    /// Replaces the fields of the record with `id`, preserving the id.
    async fn update_by_id(
        &self,
        id: &ProductId,
        product: ValidatedProduct,
    ) -> Result<Option<Product>, StoreError>;

    /// Removes the record with `id`. Returns `false` if there was none.
    async fn delete_by_id(&self, id: &ProductId) -> Result<bool, StoreError>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
