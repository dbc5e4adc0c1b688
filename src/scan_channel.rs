use std::time::{Duration, Instant};

use heapless::Deque;
use parking_lot::{Condvar, Mutex};

use super::scan_error::MonitorError;
use super::scan_sample::Sample;

/// Maximum number of in-flight samples between scanner and verifier.
pub const CHANNEL_CAPACITY: usize = 5;

/// Bounded FIFO connecting the scanner to the verifier.
///
/// Both ends wait at most the duration they are given. A send that times out on
/// a full queue hands the sample back inside `MonitorError::ChannelFull`.
pub struct SampleChannel {
    queue: Mutex<Deque<Sample, CHANNEL_CAPACITY>>,
    not_empty: Condvar,
    not_full: Condvar,
}

impl SampleChannel {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(Deque::new()),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    pub fn send_timeout(&self, sample: Sample, wait: Duration) -> Result<(), MonitorError> {
        let deadline = Instant::now() + wait;
        let mut queue = self.queue.lock();

        // Wait for a free slot, up to the deadline
        while queue.is_full() {
            if self.not_full.wait_until(&mut queue, deadline).timed_out() && queue.is_full() {
                return Err(MonitorError::ChannelFull(sample));
            }
        }

        queue
            .push_back(sample)
            .map_err(MonitorError::ChannelFull)?;
        drop(queue);

        self.not_empty.notify_one();
        Ok(())
    }

    pub fn recv_timeout(&self, wait: Duration) -> Result<Sample, MonitorError> {
        let deadline = Instant::now() + wait;
        let mut queue = self.queue.lock();

        loop {
            if let Some(sample) = queue.pop_front() {
                drop(queue);
                self.not_full.notify_one();
                return Ok(sample);
            }

            if self.not_empty.wait_until(&mut queue, deadline).timed_out() && queue.is_empty() {
                return Err(MonitorError::ReceiveTimeout);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl Default for SampleChannel {
    fn default() -> Self {
        Self::new()
    }
}
