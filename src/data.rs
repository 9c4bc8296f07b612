//! Startup-time loaders for the historical dataset and the location list.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::encoding::LocationEncoder;

/// One usable row of the historical dataset.
#[derive(Debug, Clone)]
pub struct PropertyRecord {
    pub location: String,
    pub price: f64,
}

/// Raw CSV row. Only `location` and `price` matter here; the dataset's other
/// columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    location: String,
    #[serde(default)]
    price: String,
}

/// Load historical records from a CSV file.
///
/// Rows without a usable price cannot contribute to a mean and are skipped.
/// A missing location is kept as an empty string and grouped under the
/// empty key.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyRecord>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open dataset {}", path.display()))?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.deserialize::<RawRecord>() {
        let raw = match row {
            Ok(raw) => raw,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        match raw.price.trim().parse::<f64>() {
            Ok(price) if price.is_finite() => records.push(PropertyRecord {
                location: raw.location,
                price,
            }),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, path = %path.display(), "Skipped rows without a usable price");
    }
    info!(rows = records.len(), path = %path.display(), "Historical dataset loaded");

    Ok(records)
}

/// Build the location encoder from the historical dataset.
///
/// An unreadable dataset degrades to the empty encoder (zero fallback); the
/// pipeline keeps working, it just encodes every location identically.
pub fn build_location_encoder<P: AsRef<Path>>(path: P) -> LocationEncoder {
    match load_dataset(path) {
        Ok(records) => {
            let encoder = LocationEncoder::from_records(&records);
            info!(
                locations = encoder.len(),
                global_mean = encoder.global_mean(),
                "Location encodings built"
            );
            encoder
        }
        Err(e) => {
            warn!(error = %e, "Could not load historical dataset; location encoding degrades to the zero fallback");
            LocationEncoder::empty()
        }
    }
}

/// Load the recognized location names used to populate the form.
///
/// Presentation only: encoding works for any string, listed or not.
pub fn load_locations<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open location list {}", path.display()))?;

    let locations: Vec<String> = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse location list {}", path.display()))?;
    let locations: Vec<String> = locations
        .into_iter()
        .map(|location| location.trim().to_string())
        .collect();

    info!(count = locations.len(), "Location list loaded");
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_dataset_keeps_priced_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "data.csv",
            "area_type,location,size,price\n\
             Plot Area,Whitefield,2 BHK,100.0\n\
             Carpet Area,Hebbal,3 BHK,50.5\n",
        );

        let records = load_dataset(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].location, "Whitefield");
        assert_eq!(records[0].price, 100.0);
        assert_eq!(records[1].price, 50.5);
    }

    #[test]
    fn test_load_dataset_skips_unpriced_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "data.csv",
            "location,price\n\
             Whitefield,100.0\n\
             Hebbal,\n\
             Jayanagar,n/a\n",
        );

        let records = load_dataset(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].location, "Whitefield");
    }

    #[test]
    fn test_build_location_encoder_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "data.csv",
            "location,price\n\
             Whitefield,100.0\n\
             WHITEFIELD ,200.0\n\
             Hebbal,60.0\n",
        );

        let encoder = build_location_encoder(&path);

        assert_eq!(encoder.len(), 2);
        assert_eq!(encoder.encode("whitefield"), 150.0);
        assert_eq!(encoder.encode("nowhere"), 120.0);
    }

    #[test]
    fn test_missing_dataset_degrades_to_empty_encoder() {
        let encoder = build_location_encoder("/nonexistent/data.csv");

        assert!(encoder.is_empty());
        assert_eq!(encoder.encode("Whitefield"), 0.0);
    }

    #[test]
    fn test_load_locations_trims_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "locations.json", r#"[" Whitefield", "Hebbal "]"#);

        let locations = load_locations(&path).unwrap();

        assert_eq!(locations, vec!["Whitefield", "Hebbal"]);
    }

    #[test]
    fn test_load_locations_missing_file_is_an_error() {
        assert!(load_locations("/nonexistent/locations.json").is_err());
    }
}
