//! Metrics sink boundary.
//!
//! This module is the only bridge between execution logic and the
//! thread-local metrics state.

use crate::{error::ErrorOrigin, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    QueryStart,
    DefinitionPulled { count: u64, skipped: bool },
    PolicyUnresolved { count: u64 },
    OfferEmitted,
    QueryFinish { offers: u64 },
    QueryFailed { origin: ErrorOrigin },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        metrics::with_state_mut(|m| match event {
            MetricsEvent::QueryStart => {
                m.ops.queries_started = m.ops.queries_started.saturating_add(1);
            }
            MetricsEvent::DefinitionPulled { count, skipped } => {
                m.ops.definitions_pulled = m.ops.definitions_pulled.saturating_add(1);
                m.ops.assets_counted = m.ops.assets_counted.saturating_add(count);
                if skipped {
                    m.ops.definitions_skipped = m.ops.definitions_skipped.saturating_add(1);
                }
            }
            MetricsEvent::PolicyUnresolved { .. } => {
                m.ops.policies_unresolved = m.ops.policies_unresolved.saturating_add(1);
            }
            MetricsEvent::OfferEmitted => {
                m.ops.offers_emitted = m.ops.offers_emitted.saturating_add(1);
            }
            MetricsEvent::QueryFinish { .. } => {
                m.ops.queries_finished = m.ops.queries_finished.saturating_add(1);
            }
            MetricsEvent::QueryFailed { .. } => {
                m.ops.queries_failed = m.ops.queries_failed.saturating_add(1);
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let override_sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match override_sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override on this thread.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0.take();
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// TESTS
///
