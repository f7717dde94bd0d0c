//! Logging facilities for Horizon Accordion.
//!
//! Horizon Accordion uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_accordion=debug")
//!     .init();
//! ```

/// Span names used throughout Horizon Accordion for tracing.
pub mod span_names {
    /// The stretch-height distribution pass.
    pub const STRETCH: &str = "horizon_accordion::stretch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_accordion_core::signal";
    /// Reconciliation engine target.
    pub const ENGINE: &str = "horizon_accordion::engine";
    /// Transition executor target.
    pub const TRANSITION: &str = "horizon_accordion::transition";
    /// Height resolver target.
    pub const HEIGHT: &str = "horizon_accordion::height";
    /// Reorder coordinator target.
    pub const REORDER: &str = "horizon_accordion::reorder";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_accordion::config";
    /// Performance spans.
    pub const PERF: &str = "horizon_accordion::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
