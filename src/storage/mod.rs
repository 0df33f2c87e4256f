pub mod product;

pub use product::{InMemoryProductStore, PgProductStore, ProductStore, StoreError};
