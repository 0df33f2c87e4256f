//! Statically declared product schema and the validation engine.
//!
//! [`validate`] is a pure check-and-project: it walks [`PRODUCT_SCHEMA`] in declaration
//! order, stops at the first failing field and, on success, returns exactly the six
//! schema fields. Keys that are not in the schema (including a body `id`) never reach the
//! output. Create and update share the same schema; there is no partial variant.

use crate::domain::product::model::{ProductFields, ValidatedProduct};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Bool,
}

impl FieldKind {
    fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "a string",
            FieldKind::Number => "a number",
            FieldKind::Bool => "a boolean",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Inclusive `(min, max)` bounds for numeric fields.
    pub range: Option<(f64, f64)>,
}

const NAME: FieldSpec = FieldSpec { name: "name", kind: FieldKind::Text, range: None };
const TYPE: FieldSpec = FieldSpec { name: "type", kind: FieldKind::Text, range: None };
const PRICE: FieldSpec = FieldSpec { name: "price", kind: FieldKind::Number, range: None };
const RATING: FieldSpec = FieldSpec { name: "rating", kind: FieldKind::Number, range: Some((0.0, 5.0)) };
const WARRANTY_YEARS: FieldSpec =
    FieldSpec { name: "warranty_years", kind: FieldKind::Number, range: None };
const AVAILABLE: FieldSpec = FieldSpec { name: "available", kind: FieldKind::Bool, range: None };

/// Every field is required. Declaration order is the order failures are reported in.
pub const PRODUCT_SCHEMA: &[FieldSpec] = &[NAME, TYPE, PRICE, RATING, WARRANTY_YEARS, AVAILABLE];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("\"value\" must be of type object")]
    NotAnObject,
    #[error("\"{field}\" is required")]
    Missing { field: &'static str },
    #[error("\"{field}\" must be {expected}")]
    WrongType { field: &'static str, expected: &'static str },
    #[error("\"{field}\" is not allowed to be empty")]
    Empty { field: &'static str },
    #[error("\"{field}\" must be greater than or equal to {min}")]
    TooSmall { field: &'static str, min: f64 },
    #[error("\"{field}\" must be less than or equal to {max}")]
    TooLarge { field: &'static str, max: f64 },
}

impl ValidationError {
    /// Name of the offending field, if the failure is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::NotAnObject => None,
            ValidationError::Missing { field }
            | ValidationError::WrongType { field, .. }
            | ValidationError::Empty { field }
            | ValidationError::TooSmall { field, .. }
            | ValidationError::TooLarge { field, .. } => Some(*field),
        }
    }
}

fn lookup<'a>(obj: &'a Map<String, JsonValue>, spec: &FieldSpec) -> Result<&'a JsonValue, ValidationError> {
    obj.get(spec.name).ok_or(ValidationError::Missing { field: spec.name })
}

fn wrong_type(spec: &FieldSpec) -> ValidationError {
    ValidationError::WrongType {
        field: spec.name,
        expected: spec.kind.describe(),
    }
}

fn text(obj: &Map<String, JsonValue>, spec: &FieldSpec) -> Result<String, ValidationError> {
    let s = lookup(obj, spec)?.as_str().ok_or_else(|| wrong_type(spec))?;
    if s.is_empty() {
        return Err(ValidationError::Empty { field: spec.name });
    }
    Ok(s.to_string())
}

fn number(obj: &Map<String, JsonValue>, spec: &FieldSpec) -> Result<f64, ValidationError> {
    let n = lookup(obj, spec)?.as_f64().ok_or_else(|| wrong_type(spec))?;
    if let Some((min, max)) = spec.range {
        if n < min {
            return Err(ValidationError::TooSmall { field: spec.name, min });
        }
        if n > max {
            return Err(ValidationError::TooLarge { field: spec.name, max });
        }
    }
    Ok(n)
}

fn boolean(obj: &Map<String, JsonValue>, spec: &FieldSpec) -> Result<bool, ValidationError> {
    lookup(obj, spec)?.as_bool().ok_or_else(|| wrong_type(spec))
}

/// Validates an untyped candidate payload against [`PRODUCT_SCHEMA`].
pub fn validate(candidate: &JsonValue) -> Result<ValidatedProduct, ValidationError> {
    let obj = candidate.as_object().ok_or(ValidationError::NotAnObject)?;

    // Struct fields are evaluated in source order, which is schema order.
    Ok(ValidatedProduct::new(ProductFields {
        name: text(obj, &NAME)?,
        kind: text(obj, &TYPE)?,
        price: number(obj, &PRICE)?,
        rating: number(obj, &RATING)?,
        warranty_years: number(obj, &WARRANTY_YEARS)?,
        available: boolean(obj, &AVAILABLE)?,
    }))
}
