use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, OutputPin, PinDriver};
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::hal::task::thread::ThreadSpawnConfiguration;

use super::scan_error::MonitorError;
use super::scan_indicator::IndicatorPin;
use super::scan_tasks::TaskSpec;

pub type IndicatorOutput = PinDriver<'static, AnyOutputPin, Output>;

impl IndicatorPin for PinDriver<'static, AnyOutputPin, Output> {
    fn set_high(&mut self) -> Result<(), MonitorError> {
        PinDriver::set_high(self).map_err(|err| MonitorError::Pin(err.to_string()))
    }

    fn set_low(&mut self) -> Result<(), MonitorError> {
        PinDriver::set_low(self).map_err(|err| MonitorError::Pin(err.to_string()))
    }
}

/// Claim the warn LED (GPIO2) and the okay LED (GPIO4), both driven low.
pub fn take_indicator_pins() -> Result<(IndicatorOutput, IndicatorOutput), MonitorError> {
    // Retrieve peripherals
    let peripherals = Peripherals::take().map_err(|err| MonitorError::Platform(err.to_string()))?;

    // Initialize LED pins
    let warn_output = peripherals.pins.gpio2.downgrade_output();
    let okay_output = peripherals.pins.gpio4.downgrade_output();
    let mut warn = PinDriver::output(warn_output).map_err(|err| MonitorError::Pin(err.to_string()))?;
    let mut okay = PinDriver::output(okay_output).map_err(|err| MonitorError::Pin(err.to_string()))?;

    IndicatorPin::set_low(&mut warn)?;
    IndicatorPin::set_low(&mut okay)?;

    Ok((warn, okay))
}

/// Name, priority and stack of the next spawned FreeRTOS task.
pub fn apply_task_config(task: &TaskSpec) -> Result<(), MonitorError> {
    ThreadSpawnConfiguration {
        name: Some(task.c_name),
        priority: task.priority,
        stack_size: task.stack_size,
        ..Default::default()
    }
    .set()
    .map_err(|err| MonitorError::Platform(err.to_string()))
}

pub fn reset_task_config() -> Result<(), MonitorError> {
    ThreadSpawnConfiguration::default()
        .set()
        .map_err(|err| MonitorError::Platform(err.to_string()))
}

pub fn restart() -> ! {
    esp_idf_svc::hal::reset::restart()
}
