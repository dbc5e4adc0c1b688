//! Verifier task: drains the sample channel, classifies every SSID against the
//! allow-list and drives the indicators. It is also the liveness watchdog of the
//! whole pipeline.
//!
//! ```text
//!                     sample received
//!        ┌────────────────────────────────────────┐
//!        │                                        ▼
//!  ┌─────────────────┐  timeout < N   ┌──────────────────────┐
//!  │ AWAITING_SAMPLE │ ◄───────────── │ AUTHORIZED / BLOCKED │
//!  └─────────────────┘                └──────────────────────┘
//!        │ N consecutive timeouts
//!        ▼
//!  ┌─────────────────┐
//!  │   RECOVERING    │  restart, terminal
//!  └─────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use super::scan_allow_list::AllowListStore;
use super::scan_channel::SampleChannel;
use super::scan_clock::millis_since_boot;
use super::scan_config::MonitorConfig;
use super::scan_indicator::{IndicatorDriver, IndicatorPin};
use super::scan_restart::{RecoveryAction, RecoveryReason};
use super::scan_sample::{Identifier, Sample};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierState {
    AwaitingSample,
    Authorized,
    Blocked,
    Recovering,
}

/// Outcome of one pass through the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierStep {
    Authorized(Identifier),
    Blocked(Identifier),
    /// Allow-list unreachable; shown as blocked.
    LockBusy(Identifier),
    /// Receive window elapsed; carries the consecutive timeout count.
    TimedOut(u32),
    Recovering(u32),
}

impl VerifierStep {
    /// State the machine passed through on this step.
    pub fn state(&self) -> VerifierState {
        match self {
            VerifierStep::Authorized(_) => VerifierState::Authorized,
            VerifierStep::Blocked(_) | VerifierStep::LockBusy(_) => VerifierState::Blocked,
            VerifierStep::TimedOut(_) => VerifierState::AwaitingSample,
            VerifierStep::Recovering(_) => VerifierState::Recovering,
        }
    }
}

pub struct Verifier<W, O, R>
where
    W: IndicatorPin,
    O: IndicatorPin,
    R: RecoveryAction,
{
    channel: Arc<SampleChannel>,
    allow_list: Arc<AllowListStore>,
    indicator: IndicatorDriver<W, O>,
    recovery: R,
    receive_timeout: Duration,
    timeout_threshold: u32,
    consecutive_timeouts: u32,
    recovering: bool,
}

impl<W, O, R> Verifier<W, O, R>
where
    W: IndicatorPin,
    O: IndicatorPin,
    R: RecoveryAction,
{
    pub fn new(
        channel: Arc<SampleChannel>,
        allow_list: Arc<AllowListStore>,
        indicator: IndicatorDriver<W, O>,
        recovery: R,
        config: &MonitorConfig,
    ) -> Self {
        Self {
            channel,
            allow_list,
            indicator,
            recovery,
            receive_timeout: config.receive_timeout(),
            timeout_threshold: config.timeout_threshold,
            consecutive_timeouts: 0,
            recovering: false,
        }
    }

    pub fn consecutive_timeouts(&self) -> u32 {
        self.consecutive_timeouts
    }

    pub fn step(&mut self) -> VerifierStep {
        // Recovery is terminal; never restart twice
        if self.recovering {
            return VerifierStep::Recovering(self.consecutive_timeouts);
        }

        match self.channel.recv_timeout(self.receive_timeout) {
            Ok(sample) => {
                self.consecutive_timeouts = 0;
                self.verify(sample)
            }
            Err(_) => self.on_timeout(),
        }
    }

    /// Task body: loop until recovery has been triggered.
    pub fn run(mut self) {
        loop {
            if let VerifierStep::Recovering(_) = self.step() {
                return;
            }
        }
    }

    fn verify(&mut self, sample: Sample) -> VerifierStep {
        let ssid = sample.ssid;

        match self.allow_list.is_authorized(&ssid) {
            Ok(true) => {
                log::info!("[{} ms] [AUTHORIZED] Network authorized: {}", millis_since_boot(), ssid);
                self.indicator.authorized_pattern();
                VerifierStep::Authorized(ssid)
            }
            Ok(false) => {
                log::warn!("[{} ms] [BLOCKED] Network blocked: {}", millis_since_boot(), ssid);
                self.indicator.blocked_pattern();
                VerifierStep::Blocked(ssid)
            }
            Err(err) => {
                log::error!("[ERROR] Failed to access allow-list ({})", err);
                log::warn!(
                    "[{} ms] [BLOCKED] Network not verified: {}",
                    millis_since_boot(),
                    ssid
                );
                self.indicator.blocked_pattern();
                VerifierStep::LockBusy(ssid)
            }
        }
    }

    fn on_timeout(&mut self) -> VerifierStep {
        self.consecutive_timeouts = self.consecutive_timeouts.saturating_add(1);
        log::warn!("[WARNING] No SSID received (timeout {})", self.consecutive_timeouts);

        if self.consecutive_timeouts < self.timeout_threshold {
            return VerifierStep::TimedOut(self.consecutive_timeouts);
        }

        log::error!("[RECOVERY] Restarting due to inactivity...");
        self.recovering = true;
        self.recovery.restart(RecoveryReason {
            consecutive_timeouts: self.consecutive_timeouts,
        });
        VerifierStep::Recovering(self.consecutive_timeouts)
    }
}
