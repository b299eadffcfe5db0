//! One pass over the attached sensors.

use temperx_core::{Calibration, DeviceIdentity, RawReading, Reading, SensorModel};
use temperx_metrics::MetricSink;
use tracing::{debug, trace, warn};

use crate::error::{HidError, HidResult};
use crate::session::Session;
use crate::transport::{DeviceDescriptor, HidTransport};

/// A matching device that could not be read.
#[derive(Debug)]
pub struct DeviceFailure {
    /// Position in enumeration order, starting at 1
    pub index: usize,
    /// Identity of the device
    pub identity: DeviceIdentity,
    /// What went wrong
    pub error: HidError,
}

/// Outcome of a scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Number of HID devices seen
    pub enumerated: usize,
    /// Number of devices matching the sensor model
    pub matched: usize,
    /// Successful readings, in enumeration order
    pub readings: Vec<Reading>,
    /// Matching devices that were skipped
    pub failures: Vec<DeviceFailure>,
}

/// Read every attached sensor of `model` once.
///
/// Each device gets an index from its position in the enumeration,
/// starting at 1. Devices that do not match `model` are skipped without
/// being opened. A sensor that fails to open, write or read is logged and
/// skipped; the scan carries on with the next device.
///
/// Every reading is calibrated and reported as the gauge
/// `<index>.temperature`. The sink is flushed once, after the last device.
///
/// # Errors
/// Returns [`HidError::Enumerate`] if the device list cannot be read.
pub fn scan<T, S>(
    transport: &mut T,
    model: &SensorModel,
    calibration: &Calibration,
    sink: &mut S,
) -> HidResult<ScanSummary>
where
    T: HidTransport,
    S: MetricSink + ?Sized,
{
    let devices = transport.enumerate().map_err(HidError::Enumerate)?;
    let mut summary = ScanSummary::default();

    for (position, device) in devices.enumerate() {
        let index = position + 1;
        summary.enumerated = index;

        if !model.matches(&device.identity) {
            trace!(index, identity = %device.identity, "Not a {} sensor", model.name);
            continue;
        }
        summary.matched += 1;

        match read_sensor(transport, model, &device) {
            Ok(raw) => {
                let temperature = raw.decode_with(model.decode);
                let reading = Reading {
                    index,
                    identity: device.identity,
                    raw,
                    temperature,
                    calibrated: calibration.apply_temperature(temperature),
                };
                debug!(
                    index,
                    raw = raw.value(),
                    temperature,
                    calibrated = reading.calibrated,
                    "Read temperature"
                );
                sink.gauge(&reading.temperature_metric(), reading.calibrated);
                summary.readings.push(reading);
            }
            Err(error) => {
                warn!(
                    index,
                    identity = %device.identity,
                    path = %device.display_path(),
                    stage = error.stage(),
                    error = %error,
                    "Skipping sensor"
                );
                summary.failures.push(DeviceFailure { index, identity: device.identity, error });
            }
        }
    }

    sink.flush();
    Ok(summary)
}

fn read_sensor<T: HidTransport>(
    transport: &T,
    model: &SensorModel,
    device: &DeviceDescriptor,
) -> HidResult<RawReading> {
    let mut session = Session::open(transport, device)?;
    let raw = session.exchange(model)?;
    session.close();
    Ok(raw)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use assert_matches::assert_matches;
    use mockall::Sequence;
    use temperx_core::TEMPER_X;
    use temperx_metrics::{MockMetricSink, NoopSink};

    use super::*;
    use crate::error::TransportError;
    use crate::testing::{Behaviour, FakeTransport};

    fn keyboard() -> DeviceIdentity {
        // The sensor's own keyboard interface
        DeviceIdentity::new(0x413d, 0x2107, 0x0000, 0x00)
    }

    #[test]
    fn test_single_sensor_reading() {
        let mut transport = FakeTransport::new();
        transport.add_sensor(Behaviour::respond(0x19, 0x40));

        let mut sink = MockMetricSink::new();
        let mut seq = Sequence::new();
        sink.expect_gauge()
            .withf(|name, value| name.to_string() == "1.temperature" && *value == 50.5)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_flush().times(1).in_sequence(&mut seq).return_const(());

        let summary =
            scan(&mut transport, &TEMPER_X, &Calibration::default(), &mut sink).expect("scan");

        assert_eq!(summary.enumerated, 1);
        assert_eq!(summary.matched, 1);
        assert_eq!(summary.readings.len(), 1);
        assert_eq!(summary.readings[0].temperature, 50.5);
        assert!(summary.failures.is_empty());
    }

    #[test]
    fn test_calibration_applied_to_gauge() {
        let mut transport = FakeTransport::new();
        transport.add_sensor(Behaviour::respond(0x19, 0x40));
        let calibration =
            Calibration { temperature_factor: 2.0, temperature_offset: -1.0, ..Default::default() };

        let mut sink = MockMetricSink::new();
        sink.expect_gauge()
            .withf(|name, value| name.to_string() == "1.temperature" && *value == 100.0)
            .times(1)
            .return_const(());
        sink.expect_flush().times(1).return_const(());

        let summary = scan(&mut transport, &TEMPER_X, &calibration, &mut sink).expect("scan");

        assert_eq!(summary.readings[0].temperature, 50.5);
        assert_eq!(summary.readings[0].calibrated, 100.0);
    }

    #[test]
    fn test_non_matching_devices_untouched() {
        let mut transport = FakeTransport::new();
        let kbd = transport.add_device(keyboard(), Behaviour::respond(0x19, 0x40));
        let mouse =
            transport.add_device(DeviceIdentity::new(0x046d, 0xc077, 0x7200, 0), Behaviour::OpenDenied);

        let mut sink = MockMetricSink::new();
        sink.expect_gauge().never();
        sink.expect_flush().times(1).return_const(());

        let summary =
            scan(&mut transport, &TEMPER_X, &Calibration::default(), &mut sink).expect("scan");

        assert_eq!(summary.enumerated, 2);
        assert_eq!(summary.matched, 0);
        assert!(summary.readings.is_empty());
        assert!(summary.failures.is_empty());
        assert!(transport.calls_for(&kbd.display_path()).is_empty());
        assert!(transport.calls_for(&mouse.display_path()).is_empty());
        assert_eq!(transport.calls(), ["enumerate"]);
    }

    #[test]
    fn test_index_follows_enumeration_order() {
        let mut transport = FakeTransport::new();
        transport.add_device(keyboard(), Behaviour::respond(0x00, 0x00));
        transport.add_sensor(Behaviour::respond(0x0b, 0x80));
        transport.add_device(keyboard(), Behaviour::respond(0x00, 0x00));
        transport.add_sensor(Behaviour::respond(0x19, 0x40));

        let mut sink = MockMetricSink::new();
        let mut seq = Sequence::new();
        sink.expect_gauge()
            .withf(|name, value| name.to_string() == "2.temperature" && *value == 23.0)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_gauge()
            .withf(|name, value| name.to_string() == "4.temperature" && *value == 50.5)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_flush().times(1).in_sequence(&mut seq).return_const(());

        let summary =
            scan(&mut transport, &TEMPER_X, &Calibration::default(), &mut sink).expect("scan");

        let indexes: Vec<usize> = summary.readings.iter().map(|r| r.index).collect();
        assert_eq!(indexes, [2, 4]);
        assert_eq!(summary.matched, 2);
    }

    #[test]
    fn test_failed_write_does_not_stop_scan() {
        let mut transport = FakeTransport::new();
        let first = transport.add_sensor(Behaviour::WriteTimeout);
        let second = transport.add_sensor(Behaviour::respond(0x19, 0x40));

        let mut sink = MockMetricSink::new();
        sink.expect_gauge()
            .withf(|name, _| name.to_string() == "2.temperature")
            .times(1)
            .return_const(());
        sink.expect_flush().times(1).return_const(());

        let summary =
            scan(&mut transport, &TEMPER_X, &Calibration::default(), &mut sink).expect("scan");

        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].index, 1);
        assert_matches!(summary.failures[0].error, HidError::Write(TransportError::Timeout(_)));
        assert_eq!(summary.readings.len(), 1);
        assert_eq!(summary.readings[0].index, 2);

        assert_eq!(
            transport.calls_for(&first.display_path()),
            ["open /dev/hidraw0", "write /dev/hidraw0 0180330100000000", "close /dev/hidraw0"]
        );
        assert_eq!(
            transport.calls_for(&second.display_path()),
            [
                "open /dev/hidraw1",
                "write /dev/hidraw1 0180330100000000",
                "read /dev/hidraw1",
                "close /dev/hidraw1"
            ]
        );
    }

    #[test]
    fn test_open_and_read_failures_are_isolated() {
        let mut transport = FakeTransport::new();
        transport.add_sensor(Behaviour::OpenDenied);
        transport.add_sensor(Behaviour::ReadTimeout);
        transport.add_sensor(Behaviour::respond(0x40, 0x00));

        let mut sink = MockMetricSink::new();
        sink.expect_gauge()
            .withf(|name, value| name.to_string() == "3.temperature" && *value == 128.0)
            .times(1)
            .return_const(());
        sink.expect_flush().times(1).return_const(());

        let summary =
            scan(&mut transport, &TEMPER_X, &Calibration::default(), &mut sink).expect("scan");

        let stages: Vec<&str> = summary.failures.iter().map(|f| f.error.stage()).collect();
        assert_eq!(stages, ["open", "read"]);
        assert_eq!(summary.readings.len(), 1);
        // Every opened session is closed exactly once
        assert_eq!(transport.count("open"), 3);
        assert_eq!(transport.count("close"), 2);
    }

    #[test]
    fn test_no_devices_still_flushes() {
        let mut transport = FakeTransport::new();

        let mut sink = MockMetricSink::new();
        sink.expect_gauge().never();
        sink.expect_flush().times(1).return_const(());

        let summary =
            scan(&mut transport, &TEMPER_X, &Calibration::default(), &mut sink).expect("scan");

        assert_eq!(summary.enumerated, 0);
    }

    #[test]
    fn test_rescan_walks_bus_again() {
        let mut transport = FakeTransport::new();
        transport.add_sensor(Behaviour::respond(0x19, 0x40));
        let mut sink = NoopSink;

        scan(&mut transport, &TEMPER_X, &Calibration::default(), &mut sink).expect("first scan");
        let summary =
            scan(&mut transport, &TEMPER_X, &Calibration::default(), &mut sink).expect("second scan");

        assert_eq!(transport.count("enumerate"), 2);
        assert_eq!(summary.readings[0].index, 1);
    }
}
