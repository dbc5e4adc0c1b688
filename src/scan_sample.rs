use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use super::scan_error::MonitorError;

/// Network name being classified.
///
/// Comparison is an exact, case-sensitive byte match. Nothing is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Identifier(Arc<str>);

impl Identifier {
    pub fn new(ssid: impl AsRef<str>) -> Result<Self, MonitorError> {
        let ssid = ssid.as_ref();
        if ssid.is_empty() {
            return Err(MonitorError::EmptyIdentifier);
        }
        Ok(Self(Arc::from(ssid)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = MonitorError;

    fn try_from(ssid: String) -> Result<Self, Self::Error> {
        Self::new(ssid)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One scan result travelling from the scanner to the verifier.
///
/// `sequence` is the logical timestamp: the order in which the scanner produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub ssid: Identifier,
    pub sequence: u64,
}
