use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::scan_channel::SampleChannel;
use super::scan_error::MonitorError;
use super::scan_sample::{Identifier, Sample};

/// Position in the simulated SSID rotation.
///
/// Advanced by the scanner on every tick and by the console on demand. The two
/// triggers are not ordered against each other; each advance is still atomic and
/// moves the index by exactly one, modulo the rotation length.
pub struct RotationIndex {
    position: AtomicUsize,
    len: usize,
}

impl RotationIndex {
    pub fn new(len: usize) -> Result<Self, MonitorError> {
        if len == 0 {
            return Err(MonitorError::EmptyRotation);
        }
        Ok(Self {
            position: AtomicUsize::new(0),
            len,
        })
    }

    pub fn current(&self) -> usize {
        self.position.load(Ordering::Acquire)
    }

    /// Move forward by one and return the position before the move.
    pub fn advance(&self) -> usize {
        let len = self.len;
        match self
            .position
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |position| {
                Some((position + 1) % len)
            }) {
            Ok(previous) | Err(previous) => previous,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Simulated radio: walks the configured SSIDs in a loop.
pub struct SampleSource {
    ssids: Vec<Identifier>,
    rotation: Arc<RotationIndex>,
    next_sequence: u64,
}

impl SampleSource {
    pub fn new(ssids: Vec<Identifier>) -> Result<Self, MonitorError> {
        let rotation = Arc::new(RotationIndex::new(ssids.len())?);
        Ok(Self {
            ssids,
            rotation,
            next_sequence: 0,
        })
    }

    /// Handle for the manual control task.
    pub fn rotation(&self) -> Arc<RotationIndex> {
        Arc::clone(&self.rotation)
    }

    /// Read the SSID under the index, then advance it.
    pub fn next_sample(&mut self) -> Sample {
        let position = self.rotation.advance();
        let sample = Sample {
            ssid: self.ssids[position].clone(),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        sample
    }

    /// Produce one sample and offer it to the channel. A full channel drops it.
    pub fn scan_once(
        &mut self,
        channel: &SampleChannel,
        send_wait: Duration,
    ) -> Result<Identifier, MonitorError> {
        let sample = self.next_sample();
        let ssid = sample.ssid.clone();

        channel.send_timeout(sample, send_wait)?;
        Ok(ssid)
    }
}

/// One scanner tick: produce, offer, log. A dropped sample is only logged.
pub fn scan_tick(source: &mut SampleSource, channel: &SampleChannel, send_wait: Duration) {
    match source.scan_once(channel, send_wait) {
        Ok(ssid) => {
            log::info!("[SCAN] SSID collected: {}", ssid);
        }
        Err(MonitorError::ChannelFull(sample)) => {
            log::error!("[ERROR] Queue full - SSID discarded!");
            log::info!("[SCAN] SSID collected: {}", sample.ssid);
        }
        Err(err) => {
            log::error!("[ERROR] Scan failed: {}", err);
        }
    }
}

/// Scanner task body. Never returns.
pub fn run_scanner(
    mut source: SampleSource,
    channel: Arc<SampleChannel>,
    send_wait: Duration,
    scan_interval: Duration,
) {
    loop {
        scan_tick(&mut source, &channel, send_wait);

        // Fixed interval, whatever happened above
        thread::sleep(scan_interval);
    }
}
