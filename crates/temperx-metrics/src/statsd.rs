//! StatsD gauges over UDP, sent through `cadence`.

use std::fmt;
use std::net::{ToSocketAddrs, UdpSocket};

use cadence::{BufferedUdpMetricSink, Gauged, StatsdClient};
use tracing::{info, warn};

use crate::MetricSink;
use crate::error::{MetricsError, MetricsResult};

/// Largest datagram sent to the collector.
pub const MAX_PACKET_SIZE: usize = 1432;

/// Buffered StatsD gauge client.
///
/// Gauges are sent as `<prefix>.<name>:<value>|g`, packed into datagrams of
/// at most [`MAX_PACKET_SIZE`] bytes.
pub struct StatsdSink {
    client: StatsdClient,
}

impl StatsdSink {
    /// Create a sink sending to `host` (`address:port`).
    ///
    /// An empty `prefix` sends metric names unchanged.
    ///
    /// # Errors
    /// Returns an error if the address cannot be resolved or the socket
    /// cannot be created.
    pub fn connect(host: &str, prefix: &str) -> MetricsResult<Self> {
        let addr = host
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| MetricsError::Resolve(host.to_string()))?;

        let bind_addr = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let socket = UdpSocket::bind(bind_addr)?;
        let sink = BufferedUdpMetricSink::with_capacity(addr, socket, MAX_PACKET_SIZE)?;

        info!(host, prefix, "statsd sink ready");

        Ok(Self { client: StatsdClient::from_sink(prefix, sink) })
    }

    fn send_gauge(&self, name: &str, value: f64) {
        if let Err(e) = self.client.gauge(name, value) {
            warn!(metric = name, error = %e, "Failed to record gauge");
        }
    }
}

impl fmt::Debug for StatsdSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsdSink").finish_non_exhaustive()
    }
}

impl MetricSink for StatsdSink {
    fn gauge(&mut self, name: &str, value: f64) {
        // A signed gauge value is a relative change, so reset to zero first.
        // Both lines must land in one datagram: start them in an empty buffer.
        if value.is_sign_negative() {
            self.flush();
            self.send_gauge(name, 0.0_f64);
        }
        self.send_gauge(name, value);
    }

    fn flush(&mut self) {
        if let Err(e) = self.client.flush() {
            warn!(error = %e, "Failed to send statsd packet");
        }
    }
}
