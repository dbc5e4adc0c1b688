use std::thread;

use super::scan_config::BlinkPattern;
use super::scan_error::MonitorError;

/// A single binary output (an LED on the board).
pub trait IndicatorPin {
    fn set_high(&mut self) -> Result<(), MonitorError>;
    fn set_low(&mut self) -> Result<(), MonitorError>;
}

/// Drives the "warn" and "okay" LEDs.
///
/// Every pattern blocks the caller for its whole duration, so the verifier does
/// not pull the next sample while the previous one is still being shown.
pub struct IndicatorDriver<W, O>
where
    W: IndicatorPin,
    O: IndicatorPin,
{
    warn: W,
    okay: O,
    blocked: BlinkPattern,
    authorized: BlinkPattern,
}

impl<W, O> IndicatorDriver<W, O>
where
    W: IndicatorPin,
    O: IndicatorPin,
{
    pub fn new(warn: W, okay: O, blocked: BlinkPattern, authorized: BlinkPattern) -> Self {
        Self {
            warn,
            okay,
            blocked,
            authorized,
        }
    }

    pub fn all_off(&mut self) {
        drive(&mut self.warn, "warn", false);
        drive(&mut self.okay, "okay", false);
    }

    pub fn blocked_pattern(&mut self) {
        // Ensure the okay LED is off before warning
        drive(&mut self.okay, "okay", false);

        blink(&mut self.warn, "warn", self.blocked);
    }

    pub fn authorized_pattern(&mut self) {
        blink(&mut self.okay, "okay", self.authorized);
    }
}

fn blink(pin: &mut impl IndicatorPin, name: &str, pattern: BlinkPattern) {
    for _ in 0..pattern.cycles {
        drive(pin, name, true);
        thread::sleep(pattern.on());
        drive(pin, name, false);
        thread::sleep(pattern.off());
    }
}

// A failed pin write is logged; the pattern keeps its timing.
fn drive(pin: &mut impl IndicatorPin, name: &str, high: bool) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if let Err(err) = result {
        log::error!("[ERROR] Failed to drive {} LED: {}", name, err);
    }
}

/// Stand-in for a GPIO on hosts without LEDs: level changes go to the log.
pub struct ConsolePin {
    name: &'static str,
    high: bool,
}

impl ConsolePin {
    pub fn new(name: &'static str) -> Self {
        Self { name, high: false }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    fn set(&mut self, high: bool) {
        if self.high != high {
            log::debug!("[LED] {} -> {}", self.name, if high { "HIGH" } else { "LOW" });
        }
        self.high = high;
    }
}

impl IndicatorPin for ConsolePin {
    fn set_high(&mut self) -> Result<(), MonitorError> {
        self.set(true);
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), MonitorError> {
        self.set(false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingPin(Arc<Mutex<Vec<bool>>>);

    impl RecordingPin {
        fn levels(&self) -> Vec<bool> {
            self.0.lock().unwrap().clone()
        }
    }

    impl IndicatorPin for RecordingPin {
        fn set_high(&mut self) -> Result<(), MonitorError> {
            self.0.lock().unwrap().push(true);
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), MonitorError> {
            self.0.lock().unwrap().push(false);
            Ok(())
        }
    }

    struct BrokenPin;

    impl IndicatorPin for BrokenPin {
        fn set_high(&mut self) -> Result<(), MonitorError> {
            Err(MonitorError::Pin("stuck".into()))
        }

        fn set_low(&mut self) -> Result<(), MonitorError> {
            Err(MonitorError::Pin("stuck".into()))
        }
    }

    const QUICK_BLOCKED: BlinkPattern = BlinkPattern {
        on_ms: 1,
        off_ms: 1,
        cycles: 3,
    };
    const QUICK_AUTHORIZED: BlinkPattern = BlinkPattern {
        on_ms: 1,
        off_ms: 1,
        cycles: 2,
    };

    fn driver() -> (IndicatorDriver<RecordingPin, RecordingPin>, RecordingPin, RecordingPin) {
        let warn = RecordingPin::default();
        let okay = RecordingPin::default();
        let driver =
            IndicatorDriver::new(warn.clone(), okay.clone(), QUICK_BLOCKED, QUICK_AUTHORIZED);
        (driver, warn, okay)
    }

    #[test]
    fn authorized_pattern_blinks_okay_twice() {
        let (mut driver, warn, okay) = driver();

        driver.authorized_pattern();

        assert_eq!(okay.levels(), [true, false, true, false]);
        assert!(warn.levels().is_empty());
    }

    #[test]
    fn blocked_pattern_forces_okay_off_then_blinks_warn_three_times() {
        let (mut driver, warn, okay) = driver();

        driver.blocked_pattern();

        assert_eq!(okay.levels(), [false]);
        assert_eq!(warn.levels(), [true, false, true, false, true, false]);
    }

    #[test]
    fn pattern_blocks_for_its_full_duration() {
        let warn = RecordingPin::default();
        let okay = RecordingPin::default();
        let slow = BlinkPattern {
            on_ms: 10,
            off_ms: 10,
            cycles: 2,
        };
        let mut driver = IndicatorDriver::new(warn, okay, slow, slow);

        let started = std::time::Instant::now();
        driver.authorized_pattern();

        assert!(started.elapsed() >= std::time::Duration::from_millis(40));
    }

    #[test]
    fn broken_pin_does_not_abort_pattern() {
        let okay = RecordingPin::default();
        let mut driver =
            IndicatorDriver::new(BrokenPin, okay.clone(), QUICK_BLOCKED, QUICK_AUTHORIZED);

        driver.blocked_pattern();
        driver.authorized_pattern();

        assert_eq!(okay.levels(), [false, true, false, true, false]);
    }

    #[test]
    fn console_pin_tracks_level() {
        let mut pin = ConsolePin::new("okay");
        assert!(!pin.is_high());

        pin.set_high().unwrap();
        assert!(pin.is_high());

        pin.set_low().unwrap();
        assert!(!pin.is_high());
    }
}
