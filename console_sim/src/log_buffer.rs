use std::collections::VecDeque;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

const MAX_LINES: usize = 200;

/// Keeps the latest log lines in memory, the terminal is owned by the TUI
pub struct LogBuffer {
    lines: Mutex<VecDeque<String>>,
}

static LOGGER: LogBuffer = LogBuffer {
    lines: Mutex::new(VecDeque::new()),
};

pub fn init(level: LevelFilter) -> Result<&'static LogBuffer, SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(&LOGGER)
}

impl LogBuffer {
    /// Up to `count` most recent lines, oldest first
    pub fn tail(&self, count: usize) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines
                .iter()
                .skip(lines.len().saturating_sub(count))
                .cloned()
                .collect(),
            Err(_) => vec![],
        }
    }

    fn push(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == MAX_LINES {
                lines.pop_front();
            }
            lines.push_back(line);
        }
    }
}

impl Log for LogBuffer {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.push(format!("{:<5} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}
