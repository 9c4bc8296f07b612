//! Price Prediction Service - Main Entry Point
//!
//! Loads the historical dataset and the trained model, then serves price
//! predictions over HTTP. A missing dataset or model degrades the service
//! instead of aborting startup.

use anyhow::Result;
use price_prediction_pipeline::{
    config::AppConfig,
    data,
    metrics::{MetricsReporter, PipelineMetrics},
    models::{ModelLoader, OnnxPriceModel, PriceModel},
    pipeline::PricePredictor,
    server::{self, AppState},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("price_prediction_pipeline=info".parse()?),
        )
        .init();

    info!("Starting Price Prediction Service");

    // Load configuration
    let config = AppConfig::load()?;
    info!("Configuration loaded successfully");

    // Initialize metrics
    let metrics = Arc::new(PipelineMetrics::new());

    // Location encodings from the historical dataset; an unreadable dataset
    // degrades to the empty encoder rather than failing startup.
    let location_encoder = data::build_location_encoder(&config.data.dataset_path);

    // Location list shown on the form
    let locations = match data::load_locations(&config.data.locations_path) {
        Ok(locations) => locations,
        Err(e) => {
            warn!(error = %e, "Could not load location list; the form will offer no suggestions");
            Vec::new()
        }
    };

    // A missing model is not fatal at startup either: the service stays up
    // and reports model-unavailable on every predict request.
    let model: Option<Arc<dyn PriceModel>> =
        match ModelLoader::with_threads(config.model.onnx_threads) {
            Ok(loader) => match loader.load_model(&config.model.model_path) {
                Ok(loaded) => Some(Arc::new(OnnxPriceModel::new(loaded))),
                Err(e) => {
                    error!(error = %e, "Failed to load model");
                    None
                }
            },
            Err(e) => {
                error!(error = %e, "Failed to initialize ONNX Runtime");
                None
            }
        };

    let predictor = Arc::new(PricePredictor::new(model, location_encoder));
    info!(
        model_loaded = predictor.model_available(),
        location_encodings = predictor.location_encoder().len(),
        known_locations = locations.len(),
        "Prediction pipeline initialized"
    );

    // Start metrics reporter (prints summary every 30 seconds)
    let metrics_clone = metrics.clone();
    tokio::spawn(async move {
        let reporter = MetricsReporter::new(metrics_clone, 30);
        reporter.start().await;
    });

    let state = AppState {
        predictor,
        locations: Arc::new(locations),
        metrics,
    };
    let app = server::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
