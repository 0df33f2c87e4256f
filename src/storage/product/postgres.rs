//! Persistent product store implementation using PostgreSQL.

use crate::domain::product::{Product, ProductFields, ProductId, ValidatedProduct};
use crate::storage::product::{ProductStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    seq BIGSERIAL NOT NULL,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    rating DOUBLE PRECISION NOT NULL CHECK (rating >= 0 AND rating <= 5),
    warranty_years DOUBLE PRECISION NOT NULL,
    available BOOLEAN NOT NULL
)";

const PRODUCT_COLUMNS: &str = "id, name, type, price, rating, warranty_years, available";

/// A product store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::new_with_pool(pool).await
    }

    /// Wraps an existing pool and makes sure the `products` table exists.
    pub async fn new_with_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, StoreError> {
    let id: String = row.try_get("id")?;
    Ok(Product {
        id: ProductId::from(id),
        fields: ProductFields {
            name: row.try_get("name")?,
            kind: row.try_get("type")?,
            price: row.try_get("price")?,
            rating: row.try_get("rating")?,
            warranty_years: row.try_get("warranty_years")?,
            available: row.try_get("available")?,
        },
    })
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, StoreError> {
        let sql = format!("SELECT {} FROM products ORDER BY seq", PRODUCT_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_product).collect()
    }

    async fn create(&self, product: ValidatedProduct) -> Result<Product, StoreError> {
        let id = ProductId::generate();
        let f = product.fields();
        let sql = format!(
            "INSERT INTO products (id, name, type, price, rating, warranty_years, available)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            PRODUCT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .bind(&f.name)
            .bind(&f.kind)
            .bind(f.price)
            .bind(f.rating)
            .bind(f.warranty_years)
            .bind(f.available)
            .fetch_one(&self.pool)
            .await?;
        row_to_product(&row)
    }

    async fn update_by_id(
        &self,
        id: &ProductId,
        product: ValidatedProduct,
    ) -> Result<Option<Product>, StoreError> {
        let f = product.fields();
        let sql = format!(
            "UPDATE products
             SET name = $2, type = $3, price = $4, rating = $5, warranty_years = $6, available = $7
             WHERE id = $1
             RETURNING {}",
            PRODUCT_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .bind(&f.name)
            .bind(&f.kind)
            .bind(f.price)
            .bind(f.rating)
            .bind(f.warranty_years)
            .bind(f.available)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
