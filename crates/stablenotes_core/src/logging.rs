//! Logging bootstrap and diagnostics policy.
//!
//! # Responsibility
//! - Initialize rolling file logs exactly once per process.
//! - Capture panics as structured error events.
//!
//! # Invariants
//! - Repeated init with the same configuration is a no-op.
//! - Conflicting re-initialization is rejected, never silently applied.
//! - Initialization never panics.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "stablenotes";
const ROTATE_AT_BYTES: u64 = 8 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 4;
const PANIC_SUMMARY_CHARS: usize = 120;

struct ActiveLogging {
    level: &'static str,
    directory: PathBuf,
    _handle: LoggerHandle,
}

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Initializes file logging with the given level and absolute directory.
///
/// Returns a human-readable error string when the level is unknown, the
/// directory is unusable, the logger backend fails to start, or logging is
/// already active with a different configuration.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = parse_level(level)?;
    let directory = parse_log_dir(log_dir)?;

    let state = ACTIVE.get_or_try_init(|| start_logger(level, directory.clone()))?;
    if state.level != level || state.directory != directory {
        return Err(format!(
            "logging already active with level `{}` at `{}`; refusing to reconfigure",
            state.level,
            state.directory.display()
        ));
    }
    Ok(())
}

/// Returns `(level, log_dir)` while logging is active, `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE.get().map(|state| (state.level, state.directory.clone()))
}

/// Default level per build mode: `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, directory: PathBuf) -> Result<ActiveLogging, String> {
    std::fs::create_dir_all(&directory).map_err(|err| {
        format!(
            "cannot create log directory `{}`: {err}",
            directory.display()
        )
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(directory.as_path())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("logger start failed: {err}"))?;

    install_panic_hook();

    info!(
        "event=app_start module=core status=ok platform={} version={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "event=logging_init module=core status=ok level={level} log_dir={}",
        directory.display()
    );

    Ok(ActiveLogging {
        level,
        directory,
        _handle: handle,
    })
}

fn parse_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn parse_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook() {
    PANIC_HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            // Panic payloads can carry user text; flatten and cap before they
            // reach the log file.
            error!(
                "event=panic module=core status=error location={location} payload={}",
                clamp_single_line(&panic_payload(panic_info), PANIC_SUMMARY_CHARS)
            );
            previous(panic_info);
        }));
    });
}

fn panic_payload(info: &std::panic::PanicHookInfo<'_>) -> String {
    if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn clamp_single_line(value: &str, max_chars: usize) -> String {
    let flat = value.replace(['\n', '\r'], " ");
    let mut clamped: String = flat.chars().take(max_chars).collect();
    if flat.chars().count() > max_chars {
        clamped.push_str("...");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::{clamp_single_line, init_logging, logging_status, parse_level, parse_log_dir};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("stablenotes-log-{tag}-{}-{nanos}", std::process::id()))
    }

    #[test]
    fn parse_level_normalizes_aliases() {
        assert_eq!(parse_level(" WARNING ").unwrap(), "warn");
        assert_eq!(parse_level("Info").unwrap(), "info");
        assert!(parse_level("chatty").is_err());
    }

    #[test]
    fn parse_log_dir_requires_absolute_paths() {
        assert!(parse_log_dir("relative/logs").is_err());
        assert!(parse_log_dir("  ").is_err());
    }

    #[test]
    fn clamp_single_line_flattens_and_caps() {
        let clamped = clamp_single_line("a\nb\rc", 3);
        assert!(!clamped.contains('\n'));
        assert!(clamped.ends_with("..."));
    }

    #[test]
    fn init_is_idempotent_and_rejects_reconfiguration() {
        let first = scratch_dir("first");
        let first_str = first.to_str().expect("utf-8 temp path").to_string();
        let other = scratch_dir("other");
        let other_str = other.to_str().expect("utf-8 temp path").to_string();

        init_logging("info", &first_str).expect("first init succeeds");
        init_logging("info", &first_str).expect("same config is a no-op");

        assert!(init_logging("debug", &first_str).is_err());
        assert!(init_logging("info", &other_str).is_err());

        let (level, directory) = logging_status().expect("logging active");
        assert_eq!(level, "info");
        assert_eq!(directory, first);
    }
}
