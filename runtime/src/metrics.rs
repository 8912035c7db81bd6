//! Prometheus metrics for the tasklist client.
//!
//! The store and the API transport record through the `metrics` facade; this
//! module installs a Prometheus recorder so the values can be rendered:
//! - Store dispatch and effect execution
//! - Slice request outcomes
//! - API requests and failures
//!
//! # Example
//!
//! ```rust,no_run
//! use tasklist_runtime::metrics::MetricsRecorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let recorder = MetricsRecorder::install()?;
//!
//! // ... run the client ...
//!
//! if let Some(text) = recorder.render() {
//!     println!("{text}");
//! }
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tasklist_core::lifecycle::Phase;
use thiserror::Error;

// Re-export metrics macros for use in other modules
pub use metrics::{counter, gauge, histogram};

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Installed Prometheus recorder.
pub struct MetricsRecorder {
    handle: Option<PrometheusHandle>,
}

impl MetricsRecorder {
    /// Register metric descriptions and install the global recorder.
    ///
    /// # Errors
    ///
    /// Returns error if the exporter cannot be built or installed.
    ///
    /// # Note
    ///
    /// If a recorder is already installed (e.g. by another test), this
    /// succeeds without a handle and `render()` returns `None`.
    pub fn install() -> Result<Self, MetricsError> {
        let builder = PrometheusBuilder::new()
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                &[0.000_1, 0.001, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
            )
            .map_err(|e| MetricsError::Build(e.to_string()))?;

        match builder.install_recorder() {
            Ok(handle) => {
                register_metrics();
                tracing::info!("Metrics recorder installed");
                Ok(Self {
                    handle: Some(handle),
                })
            },
            Err(e) => {
                let err_msg = e.to_string();
                if err_msg.contains("already initialized") {
                    tracing::warn!("Metrics recorder already initialized, skipping re-initialization");
                    Ok(Self { handle: None })
                } else {
                    Err(MetricsError::Install(err_msg))
                }
            },
        }
    }

    /// Render current metrics in Prometheus text format.
    ///
    /// Returns `None` if this instance did not install the recorder.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        self.handle.as_ref().map(PrometheusHandle::render)
    }
}

/// Register all metric descriptions.
fn register_metrics() {
    // Store
    describe_counter!("store.commands.total", "Total number of actions dispatched to the store");
    describe_counter!("store.effects.executed", "Total number of effects executed, by type");
    describe_histogram!("store.reducer.duration_seconds", "Time taken to run the root reducer");
    describe_counter!("store.shutdown.initiated", "Graceful shutdowns started");
    describe_counter!("store.shutdown.completed", "Graceful shutdowns that drained every effect");
    describe_counter!("store.shutdown.timeout", "Graceful shutdowns that timed out");

    // Slices
    describe_counter!("slice.requests.settled", "Slice requests settled, by slice and phase");
    describe_counter!("view.interactions.total", "User interactions dispatched from the view, by action");

    // API transport
    describe_counter!("api.requests.total", "Total number of API requests, by method");
    describe_counter!("api.requests.failed", "Total number of failed API requests, by error kind");
    describe_histogram!("api.request.duration_seconds", "Time taken by one API request");
}

/// Slice request metrics recorder.
pub struct SliceMetrics;

impl SliceMetrics {
    /// Record a settled request (fulfilled or rejected) for a slice.
    pub fn record_settled(slice: &'static str, phase: Phase) {
        let phase = match phase {
            Phase::Pending => "pending",
            Phase::Fulfilled => "fulfilled",
            Phase::Rejected => "rejected",
        };
        counter!("slice.requests.settled", "slice" => slice, "phase" => phase).increment(1);
    }
}
