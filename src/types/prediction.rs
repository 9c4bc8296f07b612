//! Prediction outcome data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Classified failure reasons for a prediction request.
///
/// Every path through the pipeline terminates in either a [`Prediction`] or
/// one of these variants; nothing escapes as a panic or an unclassified
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// No model artifact was loaded at startup. Fatal for all requests
    /// until the process restarts.
    #[error("model is not loaded")]
    ModelUnavailable,

    /// One or more of the required numeric attributes is missing or not a
    /// number. `fields` names the offending inputs for the user.
    #[error("invalid value for: {fields}")]
    InvalidInput { fields: String },

    /// The model rejected the feature vector or returned a value that
    /// cannot be inverse-transformed. Details stay in the log.
    #[error("prediction failed")]
    InferenceFailure,
}

impl PredictionError {
    /// Stable label used for metrics and log fields.
    pub fn reason(&self) -> &'static str {
        match self {
            PredictionError::ModelUnavailable => "model_unavailable",
            PredictionError::InvalidInput { .. } => "invalid_input",
            PredictionError::InferenceFailure => "inference_failure",
        }
    }
}

/// A successful price prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Unique prediction identifier
    pub prediction_id: String,

    /// Predicted price in the currency unit the model was trained against
    pub price: f64,

    /// Price rendered with currency symbol, thousands separators, and two
    /// decimal places
    pub formatted_price: String,

    /// Prediction timestamp
    pub timestamp: DateTime<Utc>,
}

impl Prediction {
    /// Create a new prediction with a generated id.
    pub fn new(price: f64, formatted_price: String) -> Self {
        Self {
            prediction_id: uuid::Uuid::new_v4().to_string(),
            price,
            formatted_price,
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of one pipeline invocation.
pub type PredictionResult = Result<Prediction, PredictionError>;
