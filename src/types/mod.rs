//! Type definitions for the price prediction pipeline

pub mod attributes;
pub mod prediction;

pub use attributes::{NumericAttributes, RawAttributes};
pub use prediction::{Prediction, PredictionError, PredictionResult};
