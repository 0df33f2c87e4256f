//! In-process product store, used by tests and by `PRODUCT_STORE=memory`.

use crate::domain::product::{Product, ProductId, ValidatedProduct};
use crate::storage::product::{ProductStore, StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.products.read().await.clone())
    }

    async fn create(&self, product: ValidatedProduct) -> Result<Product, StoreError> {
        let created = Product::new(ProductId::generate(), product);
        self.products.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_by_id(
        &self,
        id: &ProductId,
        product: ValidatedProduct,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().await;
        Ok(products.iter_mut().find(|p| &p.id == id).map(|existing| {
            existing.fields = product.into_fields();
            existing.clone()
        }))
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| &p.id != id);
        Ok(products.len() != before)
    }
}
