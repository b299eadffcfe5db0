//! temperx Metrics - Where readings are reported.
//!
//! Readings are emitted as gauges through the [`MetricSink`] trait. The
//! production sink speaks plain-text StatsD over UDP; [`NoopSink`] is used
//! when no collector is reachable.

pub mod error;
pub mod statsd;

pub use error::{MetricsError, MetricsResult};
pub use statsd::StatsdSink;

/// Destination for gauge samples.
///
/// Samples may be buffered until [`MetricSink::flush`] is called.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait MetricSink {
    /// Record the current value of a gauge.
    fn gauge(&mut self, name: &str, value: f64);

    /// Send everything buffered so far.
    fn flush(&mut self);
}

/// Sink that discards every sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl MetricSink for NoopSink {
    fn gauge(&mut self, _name: &str, _value: f64) {}

    fn flush(&mut self) {}
}

impl<S: MetricSink + ?Sized> MetricSink for Box<S> {
    fn gauge(&mut self, name: &str, value: f64) {
        (**self).gauge(name, value);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}
