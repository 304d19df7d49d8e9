use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use flexi_logger::{
    Cleanup, Criterion, DeferredNow, Duplicate, FileSpec, FormatFunction, LogSpecification,
    Logger, LoggerHandle, Naming,
};
use log::Record;

use tokentracktui::config::{AppConfig, ConfigPaths, LogLevel, APP_DIR_NAME};

const DEFAULT_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_ROTATE_KEEP: usize = 5;
const DEFAULT_BASENAME: &str = "tokentracktui";
const REDACTED: &str = "[REDACTED - Sensitive information filtered]";
const SENSITIVE_TERMS: [&str; 7] = [
    "password",
    "token",
    "key",
    "secret",
    "credential",
    "auth",
    "bearer",
];

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LogLevel,
    pub log_file: Option<PathBuf>,
    pub logs_dir: PathBuf,
    /// Mirror records to stderr
    pub console: bool,
    /// JSON lines in the log file
    pub structured: bool,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl LoggingSettings {
    pub fn new(app: &AppConfig, paths: &ConfigPaths) -> Self {
        Self {
            level: app.log_level,
            log_file: app.log_file.as_ref().map(PathBuf::from),
            logs_dir: paths.logs_dir.clone(),
            console: false,
            structured: true,
            rotate_size: DEFAULT_ROTATE_SIZE,
            rotate_keep: DEFAULT_ROTATE_KEEP,
        }
    }

    pub fn with_level(mut self, level: Option<LogLevel>) -> Self {
        if let Some(level) = level {
            self.level = level;
        }
        self
    }

    pub fn with_log_file(mut self, log_file: Option<String>) -> Self {
        self.log_file = log_file.map(PathBuf::from);
        self
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.logs_dir.join(format!("{DEFAULT_BASENAME}.log")))
    }

    fn file_spec(&self) -> (PathBuf, String) {
        let log_path = self.log_path();
        let directory = log_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.logs_dir.clone());
        let basename = log_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_BASENAME)
            .to_string();
        (directory, basename)
    }

    fn level_spec(&self) -> String {
        level_spec(self.level)
    }
}

fn level_spec(level: LogLevel) -> String {
    level.to_level_filter().to_string().to_lowercase()
}

/// Owns the running logger; dropping it flushes pending records.
pub struct LoggingContext {
    handle: LoggerHandle,
    level: LogLevel,
}

impl LoggingContext {
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Swaps the active level filter without restarting the logger.
    pub fn set_level(&mut self, level: LogLevel) -> anyhow::Result<()> {
        if level == self.level {
            return Ok(());
        }
        let spec = LogSpecification::parse(&level_spec(level))?;
        self.handle.set_new_spec(spec);
        self.level = level;
        log::info!("Log level set to {level}");
        Ok(())
    }
}

impl Drop for LoggingContext {
    fn drop(&mut self) {
        self.handle.flush();
    }
}

pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<LoggingContext> {
    let (directory, basename) = settings.file_spec();
    fs::create_dir_all(&directory)?;
    let file_format: FormatFunction = if settings.structured {
        json_format
    } else {
        plain_format
    };
    let mut logger = Logger::try_with_str(settings.level_spec())?
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .rotate(
            Criterion::Size(settings.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(settings.rotate_keep),
        )
        .format_for_files(file_format)
        .format_for_stderr(console_format);
    if settings.console {
        logger = logger.duplicate_to_stderr(duplicate_for(settings.level));
    }
    let handle = logger.start()?;
    log::info!(
        "Logging initialized - Level: {}, File: {}",
        settings.level,
        settings.log_path().display()
    );
    Ok(LoggingContext {
        handle,
        level: settings.level,
    })
}

pub fn log_timing(label: &str, elapsed: Duration, provider_count: usize) {
    log::info!(
        target: "tokentracktui::performance",
        "Performance: {label} completed in {:.3}s (providers: {provider_count})",
        elapsed.as_secs_f64()
    );
}

/// Replaces the whole message when it mentions anything credential-like.
pub fn redact(message: &str) -> Cow<'_, str> {
    if mentions_secret(message) {
        Cow::Borrowed(REDACTED)
    } else {
        Cow::Borrowed(message)
    }
}

/// Substring match, ignoring case. The crate's own name contains `token`
/// and is blanked out first.
fn mentions_secret(message: &str) -> bool {
    let lowered = message.to_ascii_lowercase().replace(APP_DIR_NAME, " ");
    SENSITIVE_TERMS.iter().any(|term| lowered.contains(term))
}

fn duplicate_for(level: LogLevel) -> Duplicate {
    match level {
        LogLevel::Debug => Duplicate::Debug,
        LogLevel::Info => Duplicate::Info,
        LogLevel::Warning => Duplicate::Warn,
        LogLevel::Error | LogLevel::Critical => Duplicate::Error,
    }
}

fn message_of(record: &Record) -> String {
    redact(&record.args().to_string()).into_owned()
}

fn json_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let entry = serde_json::json!({
        "timestamp": Local::now().to_rfc3339(),
        "level": record.level().as_str(),
        "target": record.target(),
        "message": message_of(record),
        "module": record.module_path(),
        "line": record.line(),
    });
    write!(w, "{entry}")
}

fn plain_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} | {:<8} | {:<30} | {}",
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        record.level(),
        record.target(),
        message_of(record)
    )
}

fn console_format(
    w: &mut dyn Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} | {:<8} | {:<20} | {}",
        Local::now().format("%H:%M:%S"),
        record.level(),
        record.target(),
        message_of(record)
    )
}
