//! Domain definitions for the catalog "Product" resource.
//!
//! The model types live in [`model`]; the statically declared schema and the pure
//! validation function live in [`schema`].

pub mod model;
pub mod schema;

pub use model::{Product, ProductFields, ProductId, ValidatedProduct};
pub use schema::{validate, FieldKind, FieldSpec, ValidationError, PRODUCT_SCHEMA};
