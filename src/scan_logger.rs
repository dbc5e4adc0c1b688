use super::scan_error::MonitorError;

/// Environment variable holding the host log filter (`info` when unset).
pub const LOG_LEVEL_ENV: &str = "SSID_GUARDIAN_LOG";

/// Bind the log crate to the platform logging facilities.
#[cfg(target_os = "espidf")]
pub fn init_logging() -> Result<(), MonitorError> {
    esp_idf_svc::log::EspLogger::initialize_default();
    Ok(())
}

/// Bind the log crate to the platform logging facilities.
///
/// On a host the `log` records are forwarded into a `tracing_subscriber` fmt
/// layer, stamped with milliseconds since boot.
#[cfg(not(target_os = "espidf"))]
pub fn init_logging() -> Result<(), MonitorError> {
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(host::BootClock)
        .with_target(false)
        .try_init()
        .map_err(|err| MonitorError::Platform(err.to_string()))
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::fmt;

    use tracing_subscriber::fmt::format::Writer;
    use tracing_subscriber::fmt::time::FormatTime;

    use crate::scan_clock::millis_since_boot;

    pub(super) struct BootClock;

    impl FormatTime for BootClock {
        fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
            write!(w, "{:>8}", millis_since_boot())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn boot_clock_prints_right_aligned_millis() {
            let mut line = String::new();
            BootClock.format_time(&mut Writer::new(&mut line)).unwrap();

            assert_eq!(line.len(), 8);
            assert!(line.trim_start().parse::<u64>().is_ok());
        }
    }
}
