//! The product resource service.
//!
//! This module sits between the HTTP transport and the store. It is responsible for:
//! 1.  Running the validation engine on every write (create and update alike).
//! 2.  Calling the matching store operation.
//! 3.  Folding every failure into one [`ApiError`] kind, so the transport maps
//!     validation, not-found and store failures the same way on every route.

use crate::domain::product::{validate, Product, ProductId, ValidationError};
use crate::storage::{ProductStore, StoreError};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

pub const NOT_FOUND_MESSAGE: &str = "Produit non trouvé";
pub const STORE_FAILURE_MESSAGE: &str = "Une erreur interne est survenue";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Message safe to send to the caller. Store failures do not leak internals.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Store(_) => STORE_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        self.store.list_all().await.map_err(log_store_failure)
    }

    #[instrument(skip(self, body))]
    pub async fn create(&self, body: &JsonValue) -> Result<Product, ApiError> {
        let validated = validate(body).inspect_err(|e| debug!(error = %e, "create rejected"))?;
        let product = self.store.create(validated).await.map_err(log_store_failure)?;
        info!(product_id = %product.id, "product created");
        Ok(product)
    }

    #[instrument(skip(self, id, body), fields(product_id = %id))]
    pub async fn update(&self, id: &ProductId, body: &JsonValue) -> Result<Product, ApiError> {
        let validated = validate(body).inspect_err(|e| debug!(error = %e, "update rejected"))?;
        debug!(fields = ?validated.fields(), "validated update");
        match self.store.update_by_id(id, validated).await.map_err(log_store_failure)? {
            Some(product) => {
                info!("product updated");
                Ok(product)
            }
            None => Err(ApiError::NotFound),
        }
    }

    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), ApiError> {
        if self.store.delete_by_id(id).await.map_err(log_store_failure)? {
            info!("product deleted");
            Ok(())
        } else {
            Err(ApiError::NotFound)
        }
    }
}

fn log_store_failure(e: StoreError) -> ApiError {
    error!(error = ?e, "product store failure");
    ApiError::Store(e)
}
