use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Opaque product identifier, assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Generates a fresh, unique identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The six schema fields of a product.
///
/// `Default` is the zero value of the client-side draft form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductFields {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
    /// Inclusive range `[0, 5]`.
    pub rating: f64,
    pub warranty_years: f64,
    pub available: bool,
}

/// A persisted product: an id plus the schema fields, serialized flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(value_type = String)]
    pub id: ProductId,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl Product {
    pub fn new(id: ProductId, product: ValidatedProduct) -> Self {
        Self {
            id,
            fields: product.into_fields(),
        }
    }
}

/// Product fields that passed [`crate::domain::product::validate`].
///
/// Only the validation engine constructs this type, so holding one proves the payload
/// satisfied the schema and carries no unknown fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct(ProductFields);

impl ValidatedProduct {
    pub(super) fn new(fields: ProductFields) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &ProductFields {
        &self.0
    }

    pub fn into_fields(self) -> ProductFields {
        self.0
    }
}
