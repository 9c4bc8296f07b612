//! Performance metrics and statistics tracking for the prediction service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::info;

/// Upper bounds (exclusive) of the predicted-price distribution buckets, in
/// the currency unit the model was trained against. The final bucket is
/// open-ended.
const PRICE_BUCKET_BOUNDS: [f64; 9] = [
    10.0, 25.0, 50.0, 75.0, 100.0, 150.0, 200.0, 350.0, 500.0,
];

/// Metrics collector for the prediction pipeline.
pub struct PipelineMetrics {
    /// Total predict requests handled
    pub requests_processed: AtomicU64,
    /// Requests that produced a price
    pub predictions_succeeded: AtomicU64,
    /// Failures keyed by classified reason
    failures_by_reason: RwLock<HashMap<String, u64>>,
    /// Request processing times (in microseconds)
    processing_times: RwLock<Vec<u64>>,
    /// Predicted price distribution
    price_buckets: RwLock<[u64; 10]>,
    /// Start time for rate calculation
    start_time: Instant,
}

impl PipelineMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            requests_processed: AtomicU64::new(0),
            predictions_succeeded: AtomicU64::new(0),
            failures_by_reason: RwLock::new(HashMap::new()),
            processing_times: RwLock::new(Vec::with_capacity(1000)),
            price_buckets: RwLock::new([0; 10]),
            start_time: Instant::now(),
        }
    }

    /// Record a request that produced a prediction.
    pub fn record_success(&self, processing_time: Duration, price: f64) {
        self.requests_processed.fetch_add(1, Ordering::Relaxed);
        self.predictions_succeeded.fetch_add(1, Ordering::Relaxed);
        self.push_processing_time(processing_time);

        let bucket = PRICE_BUCKET_BOUNDS
            .iter()
            .position(|&bound| price < bound)
            .unwrap_or(PRICE_BUCKET_BOUNDS.len());
        if let Ok(mut buckets) = self.price_buckets.write() {
            buckets[bucket] += 1;
        }
    }

    /// Record a request that failed with a classified reason.
    pub fn record_failure(&self, processing_time: Duration, reason: &str) {
        self.requests_processed.fetch_add(1, Ordering::Relaxed);
        self.push_processing_time(processing_time);

        if let Ok(mut by_reason) = self.failures_by_reason.write() {
            *by_reason.entry(reason.to_string()).or_insert(0) += 1;
        }
    }

    fn push_processing_time(&self, processing_time: Duration) {
        if let Ok(mut times) = self.processing_times.write() {
            times.push(processing_time.as_micros() as u64);
            // Keep only last 10000 for memory efficiency
            if times.len() > 10000 {
                times.drain(0..5000);
            }
        }
    }

    /// Get processing time statistics
    pub fn get_processing_stats(&self) -> ProcessingStats {
        let times = match self.processing_times.read() {
            Ok(times) => times,
            Err(_) => return ProcessingStats::default(),
        };
        if times.is_empty() {
            return ProcessingStats::default();
        }

        let mut sorted: Vec<u64> = times.clone();
        sorted.sort();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();

        ProcessingStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: sorted[(count as f64 * 0.95) as usize],
            p99_us: sorted[(count as f64 * 0.99) as usize],
            max_us: *sorted.last().unwrap_or(&0),
        }
    }

    /// Get current throughput (requests per second)
    pub fn get_throughput(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.requests_processed.load(Ordering::Relaxed) as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get failures keyed by classified reason
    pub fn get_failures_by_reason(&self) -> HashMap<String, u64> {
        self.failures_by_reason
            .read()
            .map(|by_reason| by_reason.clone())
            .unwrap_or_default()
    }

    /// Get predicted price distribution
    pub fn get_price_distribution(&self) -> [u64; 10] {
        self.price_buckets
            .read()
            .map(|buckets| *buckets)
            .unwrap_or([0; 10])
    }

    /// Print summary statistics
    pub fn print_summary(&self) {
        let requests = self.requests_processed.load(Ordering::Relaxed);
        let succeeded = self.predictions_succeeded.load(Ordering::Relaxed);
        let success_rate = if requests > 0 {
            (succeeded as f64 / requests as f64) * 100.0
        } else {
            0.0
        };

        let processing = self.get_processing_stats();
        let throughput = self.get_throughput();
        let failures = self.get_failures_by_reason();
        let price_dist = self.get_price_distribution();

        info!("════════ PRICE PREDICTION SERVICE - METRICS SUMMARY ════════");
        info!(
            "Requests: {} | Predictions: {} ({:.1}%) | Throughput: {:.1} req/s",
            requests, succeeded, success_rate, throughput
        );
        info!(
            "Processing time (μs): mean={} p50={} p95={} p99={} max={}",
            processing.mean_us, processing.p50_us, processing.p95_us, processing.p99_us,
            processing.max_us
        );

        if !failures.is_empty() {
            info!("Failures by reason:");
            for (reason, count) in &failures {
                info!("  {}: {}", reason, count);
            }
        }

        let total: u64 = price_dist.iter().sum();
        if total > 0 {
            info!("Predicted price distribution:");
            let mut lower = 0.0;
            for (i, &count) in price_dist.iter().enumerate() {
                let pct = (count as f64 / total as f64) * 100.0;
                let bar: String = "█".repeat(((pct / 5.0) as usize).min(20));
                match PRICE_BUCKET_BOUNDS.get(i) {
                    Some(&bound) => {
                        info!("  {:>5.0}-{:<5.0}: {:>6} ({:>5.1}%) {}", lower, bound, count, pct, bar);
                        lower = bound;
                    }
                    None => info!("  {:>5.0}+     : {:>6} ({:>5.1}%) {}", lower, count, pct, bar),
                }
            }
        }
        info!("════════════════════════════════════════════════════════════");
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Processing time statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

/// Real-time metrics reporter that prints periodic summaries
pub struct MetricsReporter {
    metrics: std::sync::Arc<PipelineMetrics>,
    interval_secs: u64,
}

impl MetricsReporter {
    pub fn new(metrics: std::sync::Arc<PipelineMetrics>, interval_secs: u64) -> Self {
        Self {
            metrics,
            interval_secs,
        }
    }

    /// Start the periodic reporting task
    pub async fn start(self) {
        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        loop {
            interval.tick().await;
            self.metrics.print_summary();
        }
    }
}
