//! Debug log: a `log` backend that appends to a file.
//!
//! tmux runs this program from key bindings and hooks, so stderr is not
//! visible. The CLI opens `debug.log` in the config directory at startup,
//! installs it as the `log` backend, and flushes it before exiting. Every
//! entry is flushed as it is written.
//!
//! The level comes from `FOCUS_ZOOM_LOG` (`off`, `error`, `warn`, `info`,
//! `debug`, `trace`); the default is `debug`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

pub const LOG_FILE: &str = "debug.log";
pub const LEVEL_ENV: &str = "FOCUS_ZOOM_LOG";


pub struct FileLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl FileLogger {
    /// Open (or create) `path` for appending.
    pub fn open(path: &Path, level: LevelFilter) -> std::io::Result<FileLogger> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(FileLogger {
            level,
            file: Mutex::new(file),
        })
    }

    /// Make this the process-wide `log` backend.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{}] {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            );
            let _ = file.flush();
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}


/// Level from `FOCUS_ZOOM_LOG`, `debug` when unset or unrecognised.
pub fn level_from_env() -> LevelFilter {
    std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Debug)
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse::<LevelFilter>().ok()
}


/// Open `<config_dir>/debug.log` and install it. Returns false when logging
/// is off or the file cannot be opened; the program runs on without a log.
pub fn init(config_dir: &Path, level: LevelFilter) -> bool {
    if level == LevelFilter::Off {
        return false;
    }
    match FileLogger::open(&config_dir.join(LOG_FILE), level) {
        Ok(logger) => logger.install().is_ok(),
        Err(_) => false,
    }
}


/// Flush the installed backend. Call once before the process exits.
pub fn shutdown() {
    log::logger().flush();
}


#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn emit(logger: &FileLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn writes_and_flushes_each_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join(LOG_FILE);
        let logger = FileLogger::open(&path, LevelFilter::Debug).unwrap();
        emit(&logger, Level::Info, "zoom applied");
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("INFO  zoom applied"));
        assert!(text.starts_with('['));
    }

    #[test]
    fn filters_below_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        let logger = FileLogger::open(&path, LevelFilter::Warn).unwrap();
        emit(&logger, Level::Debug, "hidden");
        emit(&logger, Level::Error, "shown");
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("hidden"));
        assert!(text.contains("ERROR shown"));
    }

    #[test]
    fn appends_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        emit(&FileLogger::open(&path, LevelFilter::Info).unwrap(), Level::Info, "first");
        emit(&FileLogger::open(&path, LevelFilter::Info).unwrap(), Level::Info, "second");
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn parses_levels() {
        assert_eq!(parse_level("trace"), Some(LevelFilter::Trace));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    // The only test that installs the global backend.
    #[test]
    fn install_registers_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE);
        let logger = FileLogger::open(&path, LevelFilter::Warn).unwrap();
        assert!(logger.install().is_ok());
        assert_eq!(log::max_level(), LevelFilter::Warn);
        log::warn!("through the facade");
        shutdown();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("WARN  through the facade"));
    }

    #[test]
    fn init_off_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!init(dir.path(), LevelFilter::Off));
        assert!(!dir.path().join(LOG_FILE).exists());
    }
}
