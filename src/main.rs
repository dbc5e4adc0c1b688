use std::io;
use std::thread;
use std::time::Duration;

use ssid_guardian::scan_clock;
use ssid_guardian::scan_logger;
use ssid_guardian::{DeviceRestart, Monitor, MonitorConfig, MonitorError, MonitorTasks};

fn main() {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    #[cfg(target_os = "espidf")]
    esp_idf_svc::sys::link_patches();

    // Start the boot clock before anything logs
    scan_clock::mark_boot();

    // Bind the log crate to the platform logging facilities
    if let Err(err) = scan_logger::init_logging() {
        println!("Logger unavailable: {}", err);
    }

    // Report Start
    log::info!("[SYSTEM] Initializing SSID Guardian...");

    let tasks = match start() {
        Ok(tasks) => tasks,
        Err(err) => {
            log::error!("[ERROR] Failed to start monitor: {}", err);
            halt();
        }
    };

    // The verifier only comes back once recovery has been requested
    if tasks.verifier.join().is_err() {
        log::error!("[ERROR] Verifier task panicked");
    }
    halt();
}

fn start() -> Result<MonitorTasks, MonitorError> {
    let config = MonitorConfig::embedded()?;
    let (warn, okay) = indicator_pins()?;

    let monitor = Monitor::boot(config, warn, okay, DeviceRestart)?;
    monitor.launch(io::stdin())
}

#[cfg(target_os = "espidf")]
fn indicator_pins() -> Result<
    (
        ssid_guardian::esp_hw::IndicatorOutput,
        ssid_guardian::esp_hw::IndicatorOutput,
    ),
    MonitorError,
> {
    ssid_guardian::esp_hw::take_indicator_pins()
}

#[cfg(not(target_os = "espidf"))]
fn indicator_pins() -> Result<(ssid_guardian::ConsolePin, ssid_guardian::ConsolePin), MonitorError> {
    Ok((
        ssid_guardian::ConsolePin::new("warn"),
        ssid_guardian::ConsolePin::new("okay"),
    ))
}

// Park forever; nothing starts after a boot failure.
fn halt() -> ! {
    loop {
        thread::sleep(Duration::from_secs(1));
    }
}
