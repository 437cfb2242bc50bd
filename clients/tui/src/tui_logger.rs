use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

pub type LogBuffer = Arc<Mutex<Vec<String>>>;

const CAPACITY: usize = 100;

/// Collects log records for the in-game log panel; stdout belongs to the
/// terminal UI while it runs.
pub struct TuiLogger {
    log_buffer: LogBuffer,
    level: LevelFilter,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, LogBuffer) {
        let log_buffer = Arc::new(Mutex::new(Vec::new()));
        (
            TuiLogger {
                log_buffer: log_buffer.clone(),
                level,
            },
            log_buffer,
        )
    }
}

fn format_record(record: &Record) -> String {
    match record.level() {
        Level::Error | Level::Warn => format!("{}: {}", record.level(), record.args()),
        Level::Debug | Level::Trace => format!("[{}] {}", record.target(), record.args()),
        Level::Info => format!("{}", record.args()),
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let msg = format_record(record);
            if let Ok(mut buffer) = self.log_buffer.lock() {
                buffer.push(msg);
                if buffer.len() > CAPACITY {
                    buffer.remove(0);
                }
            }
        }
    }

    fn flush(&self) {}
}
