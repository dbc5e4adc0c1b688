use thiserror::Error;

use super::scan_sample::Sample;

// Every failure the monitor can observe. Only the boot-time variants are fatal;
// the tasks log the rest and keep looping.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("channel full, SSID {} (#{}) discarded", .0.ssid, .0.sequence)]
    ChannelFull(Sample),

    #[error("no SSID received within the wait window")]
    ReceiveTimeout,

    #[error("allow-list lock not acquired within the wait window")]
    LockBusy,

    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("simulated SSID rotation has no entries")]
    EmptyRotation,

    #[error("timeout threshold must be at least 1")]
    InvalidThreshold,

    #[error("manual trigger {0:?} is not a single ASCII character")]
    InvalidTrigger(char),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to spawn task {name}: {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("indicator pin error: {0}")]
    Pin(String),

    #[error("platform error: {0}")]
    Platform(String),
}
