//! Raw property attributes submitted with a prediction request

use serde::{Deserialize, Serialize};

use crate::types::prediction::PredictionError;

/// Property attributes as submitted by the caller.
///
/// Numeric fields arrive as strings (form input) and are parsed during
/// validation. The originals are kept untouched so the caller can re-fill
/// the form after a failed submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAttributes {
    /// Room count, e.g. 2 for a 2 BHK
    #[serde(default)]
    pub size: String,

    /// Total built area in square feet
    #[serde(default)]
    pub total_sqft: String,

    /// Bathroom count
    #[serde(default)]
    pub bath: String,

    /// Balcony count
    #[serde(default)]
    pub balcony: String,

    /// Area type label, e.g. "Super built-up Area"
    #[serde(default)]
    pub area_type: String,

    /// Location name
    #[serde(default)]
    pub location: String,
}

/// The four numeric attributes after validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericAttributes {
    pub size: f64,
    pub total_sqft: f64,
    pub bath: f64,
    pub balcony: f64,
}

impl RawAttributes {
    /// Create attributes from explicit values.
    pub fn new(
        size: &str,
        total_sqft: &str,
        bath: &str,
        balcony: &str,
        area_type: &str,
        location: &str,
    ) -> Self {
        Self {
            size: size.to_string(),
            total_sqft: total_sqft.to_string(),
            bath: bath.to_string(),
            balcony: balcony.to_string(),
            area_type: area_type.to_string(),
            location: location.to_string(),
        }
    }

    /// Parse the four required numeric fields.
    ///
    /// Missing, unparseable, and non-finite values are all validation
    /// failures; the returned error names every offending field so the
    /// user can fix them in one pass.
    pub fn parse_numeric(&self) -> Result<NumericAttributes, PredictionError> {
        let mut invalid: Vec<&'static str> = Vec::new();

        let mut parse = |name: &'static str, value: &str| -> f64 {
            match value.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    invalid.push(name);
                    f64::NAN
                }
            }
        };

        let parsed = NumericAttributes {
            size: parse("size", &self.size),
            total_sqft: parse("total_sqft", &self.total_sqft),
            bath: parse("bath", &self.bath),
            balcony: parse("balcony", &self.balcony),
        };

        if invalid.is_empty() {
            Ok(parsed)
        } else {
            Err(PredictionError::InvalidInput {
                fields: invalid.join(", "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numerics() {
        let attrs = RawAttributes::new("2", "1200", "2", "1", "Plot Area", "Whitefield");
        let numeric = attrs.parse_numeric().unwrap();

        assert_eq!(numeric.size, 2.0);
        assert_eq!(numeric.total_sqft, 1200.0);
        assert_eq!(numeric.bath, 2.0);
        assert_eq!(numeric.balcony, 1.0);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let attrs = RawAttributes::new(" 2 ", "1200.5", "2", "1", "", "");
        let numeric = attrs.parse_numeric().unwrap();

        assert_eq!(numeric.size, 2.0);
        assert_eq!(numeric.total_sqft, 1200.5);
    }

    #[test]
    fn test_non_numeric_field_is_rejected() {
        let attrs = RawAttributes::new("abc", "1200", "2", "1", "Plot Area", "Whitefield");

        match attrs.parse_numeric() {
            Err(PredictionError::InvalidInput { fields }) => assert_eq!(fields, "size"),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let attrs = RawAttributes::default();

        match attrs.parse_numeric() {
            Err(PredictionError::InvalidInput { fields }) => {
                assert_eq!(fields, "size, total_sqft, bath, balcony");
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let attrs = RawAttributes::new("NaN", "inf", "2", "1", "", "");

        match attrs.parse_numeric() {
            Err(PredictionError::InvalidInput { fields }) => {
                assert_eq!(fields, "size, total_sqft");
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_form_deserialization_defaults_missing_fields() {
        // A submission without some fields still deserializes; validation
        // catches the empties afterwards.
        let attrs: RawAttributes = serde_json::from_str(r#"{"size": "2"}"#).unwrap();

        assert_eq!(attrs.size, "2");
        assert_eq!(attrs.total_sqft, "");
        assert!(attrs.parse_numeric().is_err());
    }
}
