//! Bootstrap: builds the shared objects once and hands them to the three tasks.
//!
//! ```text
//!  scanner ──► SampleChannel (5) ──► verifier ──► LEDs
//!     ▲                                  │
//!     │ RotationIndex                    └─ AllowListStore (bounded lock)
//!  console
//! ```

use std::io::Read;
use std::sync::Arc;
use std::thread::JoinHandle;

use super::scan_allow_list::AllowListStore;
use super::scan_channel::SampleChannel;
use super::scan_config::MonitorConfig;
use super::scan_console::ConsoleControl;
use super::scan_error::MonitorError;
use super::scan_indicator::{IndicatorDriver, IndicatorPin};
use super::scan_restart::RecoveryAction;
use super::scan_source::{run_scanner, SampleSource};
use super::scan_tasks::{spawn_task, CONSOLE_TASK, SCANNER_TASK, VERIFIER_TASK};
use super::scan_verifier::Verifier;

/// A fully wired monitor that has not started any task yet.
pub struct Monitor<W, O, R>
where
    W: IndicatorPin,
    O: IndicatorPin,
    R: RecoveryAction,
{
    config: MonitorConfig,
    channel: Arc<SampleChannel>,
    source: SampleSource,
    verifier: Verifier<W, O, R>,
}

pub struct MonitorTasks {
    pub scanner: JoinHandle<()>,
    pub verifier: JoinHandle<()>,
    pub console: JoinHandle<()>,
}

impl<W, O, R> Monitor<W, O, R>
where
    W: IndicatorPin + Send + 'static,
    O: IndicatorPin + Send + 'static,
    R: RecoveryAction + Send + 'static,
{
    pub fn boot(config: MonitorConfig, warn: W, okay: O, recovery: R) -> Result<Self, MonitorError> {
        config.validate()?;

        // LEDs start dark
        let mut indicator =
            IndicatorDriver::new(warn, okay, config.blocked_blink, config.authorized_blink);
        indicator.all_off();

        // Shared objects
        let channel = Arc::new(SampleChannel::new());
        let allow_list = Arc::new(AllowListStore::new(
            config.allow_list.clone(),
            config.lock_wait(),
        ));
        let source = SampleSource::new(config.simulated_ssids.clone())?;

        log::info!(
            "[SYSTEM] {} authorized networks, {} simulated SSIDs",
            config.allow_list.len(),
            config.simulated_ssids.len()
        );

        let verifier = Verifier::new(
            Arc::clone(&channel),
            allow_list,
            indicator,
            recovery,
            &config,
        );

        Ok(Self {
            config,
            channel,
            source,
            verifier,
        })
    }

    /// Spawn scanner, verifier and console tasks.
    pub fn launch<I>(self, console_input: I) -> Result<MonitorTasks, MonitorError>
    where
        I: Read + Send + 'static,
    {
        let Self {
            config,
            channel,
            source,
            verifier,
        } = self;

        let console = ConsoleControl::new(
            console_input,
            source.rotation(),
            config.trigger_byte(),
            config.console_poll(),
        );

        // Verifier before scanner: the channel never runs without a consumer
        let verifier = spawn_task(&VERIFIER_TASK, move || verifier.run())?;

        let send_wait = config.send_wait();
        let scan_interval = config.scan_interval();
        let scanner = spawn_task(&SCANNER_TASK, move || {
            run_scanner(source, channel, send_wait, scan_interval)
        })?;
        let console = spawn_task(&CONSOLE_TASK, move || console.run())?;

        log::info!("[SYSTEM] Activated - Wi-Fi monitor (test mode)");

        Ok(MonitorTasks {
            scanner,
            verifier,
            console,
        })
    }
}
