//! The prediction pipeline: validation, encoding, inference, formatting.

use std::sync::Arc;

use tracing::{debug, error};

use crate::encoding::{AreaType, FeatureAssembler, LocationEncoder};
use crate::models::PriceModel;
use crate::types::{Prediction, PredictionError, PredictionResult, RawAttributes};

/// Orchestrates one prediction request end to end.
///
/// Holds the immutable startup state (location encodings and the model
/// handle); per-request work is stateless, so a single predictor is shared
/// across all request handlers.
pub struct PricePredictor {
    model: Option<Arc<dyn PriceModel>>,
    location_encoder: LocationEncoder,
    assembler: FeatureAssembler,
}

impl PricePredictor {
    /// Create a predictor. `model` is `None` when the artifact failed to
    /// load at startup; the predictor then fails every request fast.
    pub fn new(model: Option<Arc<dyn PriceModel>>, location_encoder: LocationEncoder) -> Self {
        Self {
            model,
            location_encoder,
            assembler: FeatureAssembler::new(),
        }
    }

    /// Whether a model handle was loaded.
    pub fn model_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn location_encoder(&self) -> &LocationEncoder {
        &self.location_encoder
    }

    /// Run the full pipeline for one request.
    ///
    /// The model check runs first; validation and encoding are skipped
    /// entirely when no model is loaded. Every failure comes back as a
    /// classified [`PredictionError`]; this function does not panic.
    pub fn predict(&self, attributes: &RawAttributes) -> PredictionResult {
        let model = match &self.model {
            Some(model) => model,
            None => return Err(PredictionError::ModelUnavailable),
        };

        let numeric = attributes.parse_numeric()?;
        let area_type = AreaType::from_label(&attributes.area_type);
        let location_mean = self.location_encoder.encode(&attributes.location);
        let features = self.assembler.assemble(&numeric, area_type, location_mean);

        let log_price = match model.predict(&features) {
            Ok(value) => value,
            Err(e) => {
                error!(error = %e, "Model inference failed");
                return Err(PredictionError::InferenceFailure);
            }
        };

        // The model was trained on log(1 + price); expm1 is the exact
        // inverse.
        let price = log_price.exp_m1();
        if !price.is_finite() {
            error!(
                log_price,
                "Model returned a value that cannot be inverse-transformed"
            );
            return Err(PredictionError::InferenceFailure);
        }

        debug!(
            log_price,
            price,
            ?area_type,
            location_mean,
            "Prediction complete"
        );

        Ok(Prediction::new(price, format_price(price)))
    }
}

/// Render a price with the currency symbol, thousands separators, and two
/// decimal places, e.g. `₹ 1,000,000.00`.
pub fn format_price(price: f64) -> String {
    let formatted = format!("{:.2}", price.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price < 0.0 { "-" } else { "" };
    format!("₹ {sign}{grouped}.{frac_part}")
}
