//! Observability: runtime counters and the sink boundary they flow through.
//!
//! The executor never touches `metrics` directly; every update goes through
//! `MetricsEvent` and `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState};
pub use sink::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink};
