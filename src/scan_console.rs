use std::io::{ErrorKind, Read};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::scan_source::RotationIndex;

/// What one console read produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsolePoll {
    /// Trigger received, rotation advanced.
    Advanced,
    /// Some other byte.
    Ignored(u8),
    /// Nothing to read right now.
    Idle,
}

/// Manual control task: the trigger byte on the console advances the SSID
/// rotation out of band.
///
/// Reads block when the console supports it. Consoles that report "no data"
/// instead (end of stream, would-block) are polled every `poll_interval`, trading
/// a little latency for not spinning the CPU.
pub struct ConsoleControl<R: Read> {
    input: R,
    rotation: Arc<RotationIndex>,
    trigger: u8,
    poll_interval: Duration,
}

impl<R: Read> ConsoleControl<R> {
    pub fn new(input: R, rotation: Arc<RotationIndex>, trigger: u8, poll_interval: Duration) -> Self {
        Self {
            input,
            rotation,
            trigger,
            poll_interval,
        }
    }

    pub fn handle_command(&self, command: u8) -> ConsolePoll {
        if command != self.trigger {
            if !command.is_ascii_whitespace() {
                log::debug!("[COMMAND] Ignoring {:?}", command as char);
            }
            return ConsolePoll::Ignored(command);
        }

        log::info!("[COMMAND] Manual advance of the SSID index.");
        self.rotation.advance();
        ConsolePoll::Advanced
    }

    pub fn poll_once(&mut self) -> ConsolePoll {
        let mut buffer = [0u8; 1];

        match self.input.read(&mut buffer) {
            Ok(0) => ConsolePoll::Idle,
            Ok(_) => self.handle_command(buffer[0]),
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::WouldBlock | ErrorKind::Interrupted | ErrorKind::TimedOut
                ) =>
            {
                ConsolePoll::Idle
            }
            Err(err) => {
                log::error!("[ERROR] Console read failed: {}", err);
                ConsolePoll::Idle
            }
        }
    }

    /// Task body. Never returns.
    pub fn run(mut self) {
        loop {
            if self.poll_once() == ConsolePoll::Idle {
                thread::sleep(self.poll_interval);
            }
        }
    }
}
