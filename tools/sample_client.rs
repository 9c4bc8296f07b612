//! Sample Request Client
//!
//! Generates sample property attributes and posts them to a running
//! prediction server. Useful for smoke-testing the pipeline end to end.

use price_prediction_pipeline::types::RawAttributes;
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

const LOCATIONS: &[&str] = &[
    "Whitefield",
    "Electronic City",
    "Hebbal",
    "Rajaji Nagar",
    "Marathahalli",
    "Yelahanka",
    "Sarjapur Road",
    "Uttarahalli",
];

const AREA_TYPES: &[&str] = &[
    "Carpet Area",
    "Plot Area",
    "Super built-up Area",
    "Built-up Area",
];

/// Attribute generator for sample traffic
struct AttributeGenerator {
    rng: rand::rngs::ThreadRng,
}

impl AttributeGenerator {
    fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }

    /// Generate a plausible property
    fn generate_valid(&mut self) -> RawAttributes {
        let size = self.rng.gen_range(1..=5);
        RawAttributes::new(
            &size.to_string(),
            &self.rng.gen_range(350.0f64..4000.0).round().to_string(),
            &self.rng.gen_range(1..=size + 1).to_string(),
            &self.rng.gen_range(0..=3).to_string(),
            self.random_choice(AREA_TYPES),
            self.random_choice(LOCATIONS),
        )
    }

    /// Generate a submission with a broken numeric field, to exercise the
    /// validation path
    fn generate_invalid(&mut self) -> RawAttributes {
        let mut attributes = self.generate_valid();
        attributes.total_sqft = "not-a-number".to_string();
        attributes
    }

    fn random_choice<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[self.rng.gen_range(0..choices.len())]
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sample_client=info".parse()?),
        )
        .init();

    info!("Starting Sample Request Client");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let server_url = args
        .get(1)
        .map(|s| s.as_str())
        .unwrap_or("http://127.0.0.1:8080");
    let count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);
    let invalid_rate: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.1);
    let delay_ms: u64 = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(250);

    info!(
        server_url = %server_url,
        count = count,
        invalid_rate = invalid_rate,
        delay_ms = delay_ms,
        "Configuration loaded"
    );

    let client = reqwest::Client::new();
    let predict_url = format!("{}/predict", server_url.trim_end_matches('/'));

    let mut generator = AttributeGenerator::new();
    let mut rng = rand::thread_rng();

    let mut succeeded = 0u64;
    let mut failed = 0u64;

    for i in 0..count {
        let attributes = if rng.gen_bool(invalid_rate) {
            generator.generate_invalid()
        } else {
            generator.generate_valid()
        };

        let response = match client.post(&predict_url).form(&attributes).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Server unreachable; printing the request instead");
                info!(
                    "Sample request {}:\n{}",
                    i + 1,
                    serde_json::to_string_pretty(&attributes)?
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                continue;
            }
        };

        let body: serde_json::Value = response.json().await?;
        match body.get("status").and_then(|status| status.as_str()) {
            Some("ok") => {
                succeeded += 1;
                info!(
                    location = %attributes.location,
                    price = body["prediction"]["formatted_price"].as_str().unwrap_or(""),
                    "Prediction received"
                );
            }
            _ => {
                failed += 1;
                warn!(
                    location = %attributes.location,
                    error = body["error"].as_str().unwrap_or("unknown"),
                    "Prediction rejected"
                );
            }
        }

        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    info!(
        "Completed! Sent {} requests ({} predictions, {} failures)",
        count, succeeded, failed
    );

    Ok(())
}
