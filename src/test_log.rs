//! Per-thread capture of `log` records for unit tests.

use std::cell::RefCell;

use log::{LevelFilter, Log, Metadata, Record};

thread_local! {
    static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = record.args().to_string();
        LINES.with(|lines| lines.borrow_mut().push(line));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Install the capture logger (once per process) and clear this thread's lines.
pub(crate) fn capture() {
    // Another test may have installed it already
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
    LINES.with(|lines| lines.borrow_mut().clear());
}

/// Lines logged on this thread since `capture`.
pub(crate) fn lines() -> Vec<String> {
    LINES.with(|lines| lines.borrow().clone())
}

/// Captured lines containing `needle`, in order.
pub(crate) fn lines_with(needle: &str) -> Vec<String> {
    lines()
        .into_iter()
        .filter(|line| line.contains(needle))
        .collect()
}
