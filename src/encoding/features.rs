//! Feature vector assembly for price model inference.
//!
//! This module combines the validated attributes with the encoder outputs
//! into the input vector the model was trained on. Values pass through
//! untransformed; any scaling lives inside the trained coefficients.

use crate::encoding::area_type::AreaType;
use crate::types::attributes::NumericAttributes;

/// Number of features the model expects.
pub const FEATURE_COUNT: usize = 8;

/// Assembles validated attributes and encoder outputs into the model input.
///
/// Feature order matches the training data format and must only change
/// together with the model artifact.
pub struct FeatureAssembler;

impl FeatureAssembler {
    /// Create a new feature assembler.
    pub fn new() -> Self {
        Self
    }

    /// Assemble the feature vector:
    /// `[size, total_sqft, bath, balcony, carpet, plot, super_builtup,
    /// location_mean]`.
    ///
    /// Assembly is deterministic; identical inputs produce a bit-identical
    /// vector.
    pub fn assemble(
        &self,
        numeric: &NumericAttributes,
        area_type: AreaType,
        location_mean: f64,
    ) -> Vec<f32> {
        let [carpet, plot, super_builtup] = area_type.one_hot();

        vec![
            numeric.size as f32,
            numeric.total_sqft as f32,
            numeric.bath as f32,
            numeric.balcony as f32,
            carpet,
            plot,
            super_builtup,
            location_mean as f32,
        ]
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Feature names in model order.
    pub fn feature_names(&self) -> [&'static str; FEATURE_COUNT] {
        [
            "size",
            "total_sqft",
            "bath",
            "balcony",
            "area_carpet",
            "area_plot",
            "area_super_builtup",
            "location_mean_price",
        ]
    }
}

impl Default for FeatureAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric() -> NumericAttributes {
        NumericAttributes {
            size: 2.0,
            total_sqft: 1200.0,
            bath: 2.0,
            balcony: 1.0,
        }
    }

    #[test]
    fn test_feature_order_matches_training_schema() {
        let assembler = FeatureAssembler::new();
        let features = assembler.assemble(&numeric(), AreaType::Plot, 15.0);

        assert_eq!(features, vec![2.0, 1200.0, 2.0, 1.0, 0.0, 1.0, 0.0, 15.0]);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let assembler = FeatureAssembler::new();
        let first = assembler.assemble(&numeric(), AreaType::SuperBuiltUp, 62.5);
        let second = assembler.assemble(&numeric(), AreaType::SuperBuiltUp, 62.5);

        assert_eq!(first.len(), FEATURE_COUNT);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_numerics_pass_through_untransformed() {
        let assembler = FeatureAssembler::new();
        let large = NumericAttributes {
            size: 12.0,
            total_sqft: 99999.0,
            bath: 9.0,
            balcony: 7.0,
        };
        let features = assembler.assemble(&large, AreaType::BuiltUp, 0.0);

        assert_eq!(&features[..4], &[12.0, 99999.0, 9.0, 7.0]);
    }

    #[test]
    fn test_feature_count() {
        let assembler = FeatureAssembler::new();
        assert_eq!(assembler.feature_count(), FEATURE_COUNT);
        assert_eq!(assembler.feature_names().len(), FEATURE_COUNT);
    }
}
