//! House Price Prediction Pipeline Library
//!
//! Serves a pre-trained regression model that estimates residential property
//! prices from a small set of structural and locational attributes.

pub mod config;
pub mod data;
pub mod encoding;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use encoding::{AreaType, FeatureAssembler, LocationEncoder};
pub use models::{OnnxPriceModel, PriceModel};
pub use pipeline::PricePredictor;
pub use types::{Prediction, PredictionError, PredictionResult, RawAttributes};
