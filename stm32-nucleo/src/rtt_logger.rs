use core::fmt::Write;

use log::{LevelFilter, Log, Metadata, Record};

/// Writes log records to the J-Link RTT channel, dropping output while no probe reads it
pub struct RttLogger;

static LOGGER: RttLogger = RttLogger;

/// Must be called once, before anything logs
pub fn init(level: LevelFilter) {
    // thumbv6m has no compare-and-swap, nothing else runs yet
    unsafe {
        let _ = log::set_logger_racy(&LOGGER);
    }
    log::set_max_level(level);
}

impl Log for RttLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut output = jlink_rtt::NonBlockingOutput::new();
            let _ = writeln!(output, "{} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}
