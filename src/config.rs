//! Configuration management for the price prediction service

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Data file locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// CSV with the historical records backing the location encodings
    pub dataset_path: String,
    /// JSON list of recognized location names shown on the form
    pub locations_path: String,
}

/// Price model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Path to the serialized model artifact
    pub model_path: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_onnx_threads() -> usize {
    1
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                dataset_path: "data/Bengaluru_House_Data.csv".to_string(),
                locations_path: "data/locations.json".to_string(),
            },
            model: ModelConfig {
                model_path: "models/real-estate-price.onnx".to_string(),
                onnx_threads: 1,
            },
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
