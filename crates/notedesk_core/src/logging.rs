//! Rolling file logs for a notedesk session.
//!
//! # Responsibility
//! - Start one size-rotated log file set from a resolved `ClientConfig`.
//! - Record which backend and API host the session talks to.
//!
//! # Invariants
//! - One logger per process. Repeating `init_logging` with the same level and
//!   directory is a no-op; any other combination is rejected.
//! - Events carry metadata only. Note titles, note content and panic payload
//!   text are never written.

use crate::config::{ApiBackend, ClientConfig};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use reqwest::Url;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "notedesk";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 5;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

/// Failures starting the session logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnknownLevel(String),
    RelativeDir(PathBuf),
    CreateDir { dir: PathBuf, reason: String },
    Backend(String),
    /// A logger with different settings is already running.
    AlreadyActive { level: LevelFilter, dir: PathBuf },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel(raw) => write!(
                f,
                "unknown log level `{raw}`; expected trace|debug|info|warn|error|off"
            ),
            Self::RelativeDir(dir) => {
                write!(f, "log directory must be absolute, got `{}`", dir.display())
            }
            Self::CreateDir { dir, reason } => {
                write!(f, "cannot create log directory `{}`: {reason}", dir.display())
            }
            Self::Backend(reason) => write!(f, "logger failed to start: {reason}"),
            Self::AlreadyActive { level, dir } => write!(
                f,
                "logging already runs at `{level}` in `{}`",
                dir.display()
            ),
        }
    }
}

impl Error for LoggingError {}

/// Starts file logging for this process from `config`.
///
/// The first successful call writes a `session_start` event describing the
/// backend and API host. Later calls only verify that the settings match.
pub fn init_logging(config: &ClientConfig) -> Result<(), LoggingError> {
    let level = parse_level(&config.log_level)?;
    if !config.log_dir.is_absolute() {
        return Err(LoggingError::RelativeDir(config.log_dir.clone()));
    }

    let active = ACTIVE_LOGGER.get_or_try_init(|| {
        let logger = start_logger(level, &config.log_dir)?;
        install_panic_hook();
        log_session_start(config);
        Ok::<_, LoggingError>(logger)
    })?;

    if active.level != level || active.dir != config.log_dir {
        return Err(LoggingError::AlreadyActive {
            level: active.level,
            dir: active.dir.clone(),
        });
    }
    Ok(())
}

fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    raw.trim()
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::UnknownLevel(raw.to_string()))
}

fn start_logger(level: LevelFilter, dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(dir).map_err(|err| LoggingError::CreateDir {
        dir: dir.to_path_buf(),
        reason: err.to_string(),
    })?;

    let handle = Logger::try_with_str(level.to_string())
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

fn log_session_start(config: &ClientConfig) {
    info!(
        "event=session_start module=core status=ok version={} backend={} api_host={} timeout_ms={} no_proxy={} level={} log_dir={}",
        crate::core_version(),
        config.backend.label(),
        api_host(config),
        config.request_timeout.as_millis(),
        config.bypass_proxy,
        config.log_level,
        config.log_dir.display()
    );
}

/// `host[:port]` of the configured API, or `-` when no HTTP calls are made.
fn api_host(config: &ClientConfig) -> String {
    if config.backend == ApiBackend::Memory {
        return "-".to_string();
    }
    match Url::parse(&config.base_url) {
        Ok(url) => match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => "-".to_string(),
        },
        Err(_) => "-".to_string(),
    }
}

// Panic messages can quote note text, so only the location and size are kept.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload_chars = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| message.chars().count())
            .or_else(|| {
                info.payload()
                    .downcast_ref::<String>()
                    .map(|message| message.chars().count())
            });
        match payload_chars {
            Some(chars) => error!(
                "event=panic module=core status=error location={location} payload_chars={chars}"
            ),
            None => error!("event=panic module=core status=error location={location}"),
        }
        previous(info);
    }));
}
