//! Monitor configuration.
//!
//! The allow-list and the simulated rotation are load-time constants: they are
//! compiled into the firmware from `config/monitor.json` and parsed once at boot.
//! Nothing rewrites them while the tasks run.

use std::time::Duration;

use serde::Deserialize;

use super::scan_error::MonitorError;
use super::scan_sample::Identifier;

const EMBEDDED_CONFIG: &str = include_str!("../config/monitor.json");

/// On/off timing of one indicator sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BlinkPattern {
    pub on_ms: u64,
    pub off_ms: u64,
    pub cycles: u32,
}

impl BlinkPattern {
    pub fn on(&self) -> Duration {
        Duration::from_millis(self.on_ms)
    }

    pub fn off(&self) -> Duration {
        Duration::from_millis(self.off_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub allow_list: Vec<Identifier>,
    pub simulated_ssids: Vec<Identifier>,
    pub scan_interval_ms: u64,
    pub send_wait_ms: u64,
    pub receive_timeout_ms: u64,
    pub lock_wait_ms: u64,
    pub timeout_threshold: u32,
    pub console_poll_ms: u64,
    pub manual_trigger: char,
    pub blocked_blink: BlinkPattern,
    pub authorized_blink: BlinkPattern,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            allow_list: Vec::new(),
            simulated_ssids: Vec::new(),
            scan_interval_ms: 4000,
            send_wait_ms: 1000,
            receive_timeout_ms: 5000,
            lock_wait_ms: 1000,
            timeout_threshold: 3,
            console_poll_ms: 200,
            manual_trigger: 'r',
            blocked_blink: BlinkPattern {
                on_ms: 200,
                off_ms: 200,
                cycles: 3,
            },
            authorized_blink: BlinkPattern {
                on_ms: 150,
                off_ms: 150,
                cycles: 2,
            },
        }
    }
}

impl MonitorConfig {
    /// Configuration baked into the firmware image.
    pub fn embedded() -> Result<Self, MonitorError> {
        Self::from_json(EMBEDDED_CONFIG)
    }

    pub fn from_json(json: &str) -> Result<Self, MonitorError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.simulated_ssids.is_empty() {
            return Err(MonitorError::EmptyRotation);
        }
        if self.timeout_threshold == 0 {
            return Err(MonitorError::InvalidThreshold);
        }
        if !self.manual_trigger.is_ascii() {
            return Err(MonitorError::InvalidTrigger(self.manual_trigger));
        }
        Ok(())
    }

    /// Console byte that advances the rotation by hand.
    pub fn trigger_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.manual_trigger as u8
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    pub fn send_wait(&self) -> Duration {
        Duration::from_millis(self.send_wait_ms)
    }

    pub fn receive_timeout(&self) -> Duration {
        Duration::from_millis(self.receive_timeout_ms)
    }

    pub fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.lock_wait_ms)
    }

    pub fn console_poll(&self) -> Duration {
        Duration::from_millis(self.console_poll_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_matches_reference_data() {
        let config = MonitorConfig::embedded().unwrap();

        assert_eq!(config.allow_list.len(), 5);
        assert_eq!(config.simulated_ssids.len(), 6);
        assert_eq!(config.simulated_ssids[0].as_str(), "AlphaNet-Pro");
        assert_eq!(config.scan_interval(), Duration::from_millis(4000));
        assert_eq!(config.receive_timeout(), Duration::from_millis(5000));
        assert_eq!(config.timeout_threshold, 3);
        assert_eq!(config.trigger_byte(), b'r');
        assert_eq!(config.blocked_blink.cycles, 3);
        assert_eq!(config.authorized_blink.cycles, 2);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = MonitorConfig::from_json(r#"{ "simulated_ssids": ["A"] }"#).unwrap();

        assert!(config.allow_list.is_empty());
        assert_eq!(config.send_wait_ms, 1000);
        assert_eq!(config.lock_wait_ms, 1000);
        assert_eq!(config.console_poll_ms, 200);
    }

    #[test]
    fn empty_rotation_is_rejected() {
        let result = MonitorConfig::from_json(r#"{ "allow_list": ["A"] }"#);
        assert!(matches!(result, Err(MonitorError::EmptyRotation)));
    }

    #[test]
    fn empty_identifier_is_rejected() {
        let result = MonitorConfig::from_json(r#"{ "simulated_ssids": ["A", ""] }"#);
        assert!(matches!(result, Err(MonitorError::Config(_))));
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let result =
            MonitorConfig::from_json(r#"{ "simulated_ssids": ["A"], "timeout_threshold": 0 }"#);
        assert!(matches!(result, Err(MonitorError::InvalidThreshold)));
    }

    #[test]
    fn non_ascii_trigger_is_rejected() {
        let result =
            MonitorConfig::from_json(r#"{ "simulated_ssids": ["A"], "manual_trigger": "é" }"#);
        assert!(matches!(result, Err(MonitorError::InvalidTrigger('é'))));
    }
}
