use crate::domain::product::ProductFields;
use thiserror::Error;

/// A change to a single product field, as produced by a form control.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Name(String),
    Type(String),
    Price(f64),
    Rating(f64),
    WarrantyYears(f64),
    Available(bool),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown product field '{0}'")]
    UnknownField(String),
    #[error("'{raw}' is not a valid number for {field}")]
    NotANumber { field: &'static str, raw: String },
    #[error("'{raw}' is not a valid boolean for {field}")]
    NotABoolean { field: &'static str, raw: String },
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| InputError::NotANumber {
            field,
            raw: raw.to_string(),
        })
}

impl FieldEdit {
    /// Parses the raw text of a form input named after a schema field.
    ///
    /// Price and rating are decimals; warranty years are truncated to a whole number;
    /// availability accepts `true`/`false` and the checkbox values `on`/`off`.
    pub fn from_input(field: &str, raw: &str) -> Result<Self, InputError> {
        match field {
            "name" => Ok(FieldEdit::Name(raw.to_string())),
            "type" => Ok(FieldEdit::Type(raw.to_string())),
            "price" => parse_decimal("price", raw).map(FieldEdit::Price),
            "rating" => parse_decimal("rating", raw).map(FieldEdit::Rating),
            "warranty_years" => {
                parse_decimal("warranty_years", raw).map(|n| FieldEdit::WarrantyYears(n.trunc()))
            }
            "available" => match raw.trim().to_lowercase().as_str() {
                "true" | "on" => Ok(FieldEdit::Available(true)),
                "false" | "off" | "" => Ok(FieldEdit::Available(false)),
                _ => Err(InputError::NotABoolean {
                    field: "available",
                    raw: raw.to_string(),
                }),
            },
            other => Err(InputError::UnknownField(other.to_string())),
        }
    }

    pub fn apply_to(self, fields: &mut ProductFields) {
        match self {
            FieldEdit::Name(v) => fields.name = v,
            FieldEdit::Type(v) => fields.kind = v,
            FieldEdit::Price(v) => fields.price = v,
            FieldEdit::Rating(v) => fields.rating = v,
            FieldEdit::WarrantyYears(v) => fields.warranty_years = v,
            FieldEdit::Available(v) => fields.available = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_values() {
        assert_eq!(
            FieldEdit::from_input("price", " 12.5 ").unwrap(),
            FieldEdit::Price(12.5)
        );
        assert_eq!(
            FieldEdit::from_input("warranty_years", "2.9").unwrap(),
            FieldEdit::WarrantyYears(2.0)
        );
        assert_eq!(
            FieldEdit::from_input("available", "on").unwrap(),
            FieldEdit::Available(true)
        );
        assert_eq!(
            FieldEdit::from_input("type", "Tool").unwrap(),
            FieldEdit::Type("Tool".to_string())
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            FieldEdit::from_input("rating", "abc"),
            Err(InputError::NotANumber { field: "rating", .. })
        ));
        assert!(matches!(
            FieldEdit::from_input("price", "inf"),
            Err(InputError::NotANumber { .. })
        ));
        assert!(matches!(
            FieldEdit::from_input("available", "maybe"),
            Err(InputError::NotABoolean { .. })
        ));
        assert_eq!(
            FieldEdit::from_input("color", "red"),
            Err(InputError::UnknownField("color".to_string()))
        );
    }

    #[test]
    fn applies_to_fields() {
        let mut fields = ProductFields::default();
        FieldEdit::Name("Drill".to_string()).apply_to(&mut fields);
        FieldEdit::Rating(4.5).apply_to(&mut fields);
        assert_eq!(fields.name, "Drill");
        assert_eq!(fields.rating, 4.5);
        assert_eq!(fields.kind, "");
    }
}
