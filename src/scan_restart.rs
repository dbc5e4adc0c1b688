/// Why the verifier gave up on the current boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryReason {
    pub consecutive_timeouts: u32,
}

/// The one self-healing action of the monitor: throw the whole process away.
///
/// Kept behind a trait so a different strategy can be slotted in without
/// touching the verifier.
pub trait RecoveryAction {
    fn restart(&mut self, reason: RecoveryReason);
}

/// Restart the board (or, on a host, re-exec this binary).
pub struct DeviceRestart;

impl RecoveryAction for DeviceRestart {
    fn restart(&mut self, reason: RecoveryReason) {
        log::warn!(
            "[RECOVERY] Restart requested after {} consecutive timeouts",
            reason.consecutive_timeouts
        );

        #[cfg(target_os = "espidf")]
        crate::esp_hw::restart();

        #[cfg(not(target_os = "espidf"))]
        reexec();
    }
}

#[cfg(not(target_os = "espidf"))]
fn reexec() -> ! {
    use std::process::{self, Command};

    // Relaunch with the same arguments, then let this process die
    let mut args = std::env::args_os();
    args.next();

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(err) => {
            log::error!("[ERROR] Cannot locate own executable: {}", err);
            process::exit(1);
        }
    };

    match Command::new(exe).args(args).spawn() {
        Ok(child) => {
            log::info!("[RECOVERY] Relaunched as pid {}", child.id());
            process::exit(0);
        }
        Err(err) => {
            log::error!("[ERROR] Relaunch failed: {}", err);
            process::exit(1);
        }
    }
}
