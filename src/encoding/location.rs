//! Mean-target encoding of the location attribute.

use std::collections::HashMap;

use crate::data::PropertyRecord;

/// Maps a normalized location name to its historical mean price, with the
/// dataset-wide mean as fallback for locations never seen in training.
///
/// Built once at startup and never mutated afterwards; lookups are pure, so
/// the encoder can be shared across request handlers without locking.
#[derive(Debug, Clone, Default)]
pub struct LocationEncoder {
    price_map: HashMap<String, f64>,
    global_mean: f64,
}

impl LocationEncoder {
    /// Build the encoder from historical records.
    ///
    /// Locations are normalized (trimmed, lower-cased) before grouping. The
    /// same normalization runs again at query time, so a location can never
    /// miss its own group because of casing or stray whitespace.
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        let mut sums: HashMap<String, (f64, u64)> = HashMap::new();
        let mut total = 0.0;

        for record in records {
            let entry = sums.entry(normalize(&record.location)).or_insert((0.0, 0));
            entry.0 += record.price;
            entry.1 += 1;
            total += record.price;
        }

        let global_mean = if records.is_empty() {
            0.0
        } else {
            total / records.len() as f64
        };

        let price_map = sums
            .into_iter()
            .map(|(location, (sum, count))| (location, sum / count as f64))
            .collect();

        Self {
            price_map,
            global_mean,
        }
    }

    /// Encoder with no historical data: every lookup yields `0.0`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Encoder over an explicit mapping. Keys must already be normalized.
    pub fn from_map(price_map: HashMap<String, f64>, global_mean: f64) -> Self {
        Self {
            price_map,
            global_mean,
        }
    }

    /// Mean historical price for a location, or the global mean if unseen.
    pub fn encode(&self, location: &str) -> f64 {
        self.price_map
            .get(&normalize(location))
            .copied()
            .unwrap_or(self.global_mean)
    }

    /// Dataset-wide mean price used as the fallback value.
    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    /// Number of distinct locations with an encoding.
    pub fn len(&self) -> usize {
        self.price_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price_map.is_empty()
    }
}

fn normalize(location: &str) -> String {
    location.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(location: &str, price: f64) -> PropertyRecord {
        PropertyRecord {
            location: location.to_string(),
            price,
        }
    }

    #[test]
    fn test_groups_by_normalized_location() {
        let encoder = LocationEncoder::from_records(&[
            record("Whitefield", 100.0),
            record(" whitefield ", 200.0),
            record("WHITEFIELD", 300.0),
            record("Hebbal", 50.0),
        ]);

        assert_eq!(encoder.len(), 2);
        assert_eq!(encoder.encode("whitefield"), 200.0);
        assert_eq!(encoder.encode("Hebbal"), 50.0);
    }

    #[test]
    fn test_lookup_normalizes_like_the_build() {
        let encoder = LocationEncoder::from_records(&[record("whitefield", 15.0)]);

        assert_eq!(encoder.encode(" Whitefield "), 15.0);
        assert_eq!(encoder.encode("WHITEFIELD"), 15.0);
        assert_eq!(encoder.encode("whitefield"), 15.0);
    }

    #[test]
    fn test_unseen_location_falls_back_to_global_mean() {
        let encoder = LocationEncoder::from_records(&[
            record("Whitefield", 100.0),
            record("Hebbal", 50.0),
        ]);

        assert_eq!(encoder.encode("Electronic City"), 75.0);
    }

    #[test]
    fn test_global_mean_is_row_weighted() {
        // Two Whitefield rows and one Hebbal row: the fallback averages over
        // rows, not over the per-location means.
        let encoder = LocationEncoder::from_records(&[
            record("Whitefield", 100.0),
            record("Whitefield", 200.0),
            record("Hebbal", 60.0),
        ]);

        assert_eq!(encoder.global_mean(), 120.0);
        assert_eq!(encoder.encode("unknown"), 120.0);
    }

    #[test]
    fn test_empty_encoder_degrades_to_zero() {
        let encoder = LocationEncoder::empty();

        assert!(encoder.is_empty());
        assert_eq!(encoder.encode("Whitefield"), 0.0);
        assert_eq!(encoder.global_mean(), 0.0);
    }

    #[test]
    fn test_from_map() {
        let mut map = HashMap::new();
        map.insert("whitefield".to_string(), 15.0);
        let encoder = LocationEncoder::from_map(map, 42.0);

        assert_eq!(encoder.encode("Whitefield"), 15.0);
        assert_eq!(encoder.encode("somewhere else"), 42.0);
    }
}
