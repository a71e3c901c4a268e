//! Debug log file for par-tabs
//!
//! Every `log::info!()`, `log::debug!()` etc. in the crate is routed to a
//! file instead of stdout, so a host that shares the terminal with the
//! controller never sees stray output.
//!
//! All output goes to /tmp/par_tabs_debug.log on Unix/macOS,
//! or %TEMP%\par_tabs_debug.log on Windows.
//!
//! Errors are always mirrored to stderr, whatever the file level.

use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Global debug log file
struct DebugLogger {
    file: Option<std::fs::File>,
    /// Most verbose level written to the file
    level: log::LevelFilter,
}

impl DebugLogger {
    fn new() -> Self {
        DebugLogger {
            file: None,
            level: log::LevelFilter::Off,
        }
    }

    /// Set the file level, opening the file the first time it is not `Off`.
    fn open(&mut self, level: log::LevelFilter) {
        self.level = level;
        if self.file.is_some() || level == log::LevelFilter::Off {
            return;
        }
        match OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            Ok(f) => {
                self.file = Some(f);
                self.write_raw(&format!(
                    "\n{}\npar-tabs debug session started at {} (level={})\n{}\n",
                    "=".repeat(80),
                    get_timestamp(),
                    level,
                    "=".repeat(80)
                ));
            }
            Err(_e) => {
                // Silently fail if log file can't be opened
            }
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }
}

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    #[cfg(unix)]
    let path = PathBuf::from("/tmp/par_tabs_debug.log");
    #[cfg(not(unix))]
    let path = std::env::temp_dir().join("par_tabs_debug.log");
    path
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

/// Where a record goes: `(debug file, stderr)`.
fn destinations(level: log::Level, file_level: log::LevelFilter) -> (bool, bool) {
    (level <= file_level, level == log::Level::Error)
}

/// Facade level: the file level, but never quieter than errors.
fn facade_level(file_level: log::LevelFilter) -> log::LevelFilter {
    file_level.max(log::LevelFilter::Error)
}

/// Bridges the `log` facade into the debug log file.
struct LogBridge;

static BRIDGE: LogBridge = LogBridge;

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(logger) = LOGGER.get() else {
            return;
        };
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        let mut logger = logger.lock();
        let (to_file, to_stderr) = destinations(record.level(), logger.level);
        if to_file {
            logger.write_raw(&line);
        }
        if to_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(logger) = LOGGER.get() {
            let mut logger = logger.lock();
            if let Some(file) = logger.file.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

/// Install the log bridge.
///
/// `level` comes from the command line; without it the level stays `Off`
/// until [`set_log_level`] applies the configured one. Calling this twice is
/// harmless.
pub fn init_log_bridge(level: Option<log::LevelFilter>) {
    let level = level.unwrap_or(log::LevelFilter::Off);
    get_logger().lock().open(level);
    if log::set_logger(&BRIDGE).is_ok() {
        log::set_max_level(facade_level(level));
    }
}

/// Change the level after startup (e.g. from the config file).
pub fn set_log_level(level: log::LevelFilter) {
    get_logger().lock().open(level);
    log::set_max_level(facade_level(level));
}
