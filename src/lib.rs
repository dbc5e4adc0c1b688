//! SSID Guardian: watches the (simulated) Wi-Fi network the board sees, checks
//! it against an allow-list and reports the verdict on two LEDs and the log.
//!
//! Three tasks cooperate through a bounded channel and a lock-guarded
//! allow-list. The verifier also acts as a watchdog: when the scanner goes
//! silent for too long the whole process is restarted.

#[macro_use]
extern crate lazy_static;

#[cfg(target_os = "espidf")]
pub mod esp_hw;
pub mod scan_allow_list;
pub mod scan_channel;
pub mod scan_clock;
pub mod scan_config;
pub mod scan_console;
pub mod scan_error;
pub mod scan_indicator;
pub mod scan_logger;
pub mod scan_restart;
pub mod scan_sample;
pub mod scan_source;
pub mod scan_system;
pub mod scan_tasks;
pub mod scan_verifier;
#[cfg(test)]
mod test_log;

pub use scan_allow_list::AllowListStore;
pub use scan_channel::{SampleChannel, CHANNEL_CAPACITY};
pub use scan_config::{BlinkPattern, MonitorConfig};
pub use scan_error::MonitorError;
pub use scan_indicator::{ConsolePin, IndicatorDriver, IndicatorPin};
pub use scan_restart::{DeviceRestart, RecoveryAction, RecoveryReason};
pub use scan_sample::{Identifier, Sample};
pub use scan_source::{RotationIndex, SampleSource};
pub use scan_system::{Monitor, MonitorTasks};
pub use scan_verifier::{Verifier, VerifierState, VerifierStep};
