//! Price model invocation over ONNX Runtime

use anyhow::{Context, Result};
use std::sync::RwLock;
use tracing::debug;

use crate::models::loader::LoadedModel;

/// Narrow capability interface to the trained regression model.
///
/// The model predicts in log-price space (`log(1 + price)`); callers own the
/// inverse transform. Implementations must be callable from concurrent
/// request handlers.
pub trait PriceModel: Send + Sync {
    /// Score one feature vector, returning the raw log-space prediction.
    fn predict(&self, features: &[f32]) -> Result<f64>;
}

/// [`PriceModel`] backed by an ONNX Runtime session.
///
/// The session needs exclusive access per run; the lock is held for the
/// duration of a single inference.
pub struct OnnxPriceModel {
    model: RwLock<LoadedModel>,
}

impl OnnxPriceModel {
    /// Wrap a loaded model for shared use.
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: RwLock::new(model),
        }
    }
}

impl PriceModel for OnnxPriceModel {
    fn predict(&self, features: &[f32]) -> Result<f64> {
        use ort::value::Tensor;

        let mut model = self
            .model
            .write()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .context("Failed to create input tensor")?;

        let input_name = model.input_name.clone();
        let output_name = model.output_name.clone();

        let outputs = model
            .session
            .run(ort::inputs![input_name.as_str() => input_tensor])?;

        // Regression output is a [1] or [1, 1] tensor; take its first value.
        // The output name was resolved from session metadata at load time.
        let output = outputs
            .get(output_name.as_str())
            .context("Model output missing from results")?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .context("Model output is not an f32 tensor")?;
        let log_price = data
            .first()
            .copied()
            .context("Model output tensor is empty")?;

        debug!(log_price, "Model inference complete");

        Ok(f64::from(log_price))
    }
}
