use std::time::Instant;

lazy_static! {
    // Record a starting point when the program begins.
    static ref BOOT: Instant = Instant::now();
}

/// Pin the boot instant. Call once, as early as possible in `main`.
pub fn mark_boot() {
    lazy_static::initialize(&BOOT);
}

/// Milliseconds elapsed since boot, the timestamp used on every status line.
pub fn millis_since_boot() -> u64 {
    let elapsed = BOOT.elapsed();
    elapsed.as_millis() as u64
}
