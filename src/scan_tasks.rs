use std::thread::{self, JoinHandle};

use super::scan_error::MonitorError;

/// How a monitor task is created on the board.
///
/// Higher `priority` wins. The verifier must drain the channel and notice
/// silence promptly, so it sits above the scanner, which sits above the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: &'static str,
    /// Nul-terminated copy of `name` for FreeRTOS.
    pub c_name: &'static [u8],
    pub priority: u8,
    pub stack_size: usize,
}

pub const VERIFIER_TASK: TaskSpec = TaskSpec {
    name: "verifier",
    c_name: b"verifier\0",
    priority: 3,
    stack_size: 4096,
};

pub const SCANNER_TASK: TaskSpec = TaskSpec {
    name: "scanner",
    c_name: b"scanner\0",
    priority: 2,
    stack_size: 4096,
};

pub const CONSOLE_TASK: TaskSpec = TaskSpec {
    name: "console",
    c_name: b"console\0",
    priority: 1,
    stack_size: 4096,
};

pub fn spawn_task<F>(task: &TaskSpec, body: F) -> Result<JoinHandle<()>, MonitorError>
where
    F: FnOnce() + Send + 'static,
{
    log::debug!("Spawning task {} (priority {})", task.name, task.priority);

    #[cfg(target_os = "espidf")]
    super::esp_hw::apply_task_config(task)?;

    let builder = thread::Builder::new().name(task.name.to_string());

    // Host threads keep the platform default stack
    #[cfg(target_os = "espidf")]
    let builder = builder.stack_size(task.stack_size);

    let spawned = builder.spawn(body).map_err(|source| MonitorError::Spawn {
        name: task.name,
        source,
    });

    #[cfg(target_os = "espidf")]
    super::esp_hw::reset_task_config()?;

    spawned
}
