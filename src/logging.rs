//! JSON-lines file logger behind the `log` facade.
//!
//! The game owns the terminal in raw mode, so nothing may go to stderr while
//! it runs. Records are appended to a file instead, one JSON object per line:
//!
//! ```text
//! {"ts_ms":1700000000123,"level":"INFO","target":"tui_match3_engine::game","msg":"episode 1 mode=zen seed=42"}
//! ```
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `MATCH3_LOG_PATH` | log file; logging is off when unset or empty |
//! | `MATCH3_LOG_LEVEL` | `error`, `warn`, `info` (default), `debug`, `trace` |

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use serde::Serialize;

pub const LOG_PATH_ENV: &str = "MATCH3_LOG_PATH";
pub const LOG_LEVEL_ENV: &str = "MATCH3_LOG_LEVEL";

#[derive(Debug, Serialize)]
struct LogLine<'a> {
    ts_ms: u64,
    level: &'a str,
    target: &'a str,
    msg: String,
}

pub struct JsonlLogger {
    level: LevelFilter,
    file: Mutex<File>,
}

impl JsonlLogger {
    pub fn open(path: &Path, level: LevelFilter) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        Ok(Self {
            level,
            file: Mutex::new(file),
        })
    }

    /// One serialized record, newline terminated.
    fn encode(record: &Record<'_>) -> Option<Vec<u8>> {
        let ts_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let line = LogLine {
            ts_ms,
            level: record.level().as_str(),
            target: record.target(),
            msg: record.args().to_string(),
        };
        let mut buf = serde_json::to_vec(&line).ok()?;
        buf.push(b'\n');
        Some(buf)
    }
}

impl Log for JsonlLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Some(buf) = Self::encode(record) else {
            return;
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(&buf);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Parse a level name; unknown names fall back to `info`.
pub fn parse_level(s: &str) -> LevelFilter {
    s.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the file logger if `MATCH3_LOG_PATH` is set.
///
/// Returns whether a logger was installed.
pub fn init_from_env() -> Result<bool> {
    let Some(path) = std::env::var(LOG_PATH_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(false);
    };
    let level = std::env::var(LOG_LEVEL_ENV)
        .map(|s| parse_level(&s))
        .unwrap_or(LevelFilter::Info);

    let logger = JsonlLogger::open(Path::new(&path), level)?;
    log::set_boxed_logger(Box::new(logger)).context("install logger")?;
    log::set_max_level(level);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn writes_one_json_object_per_line() {
        let path = std::env::temp_dir().join(format!("tui-match3-log-{}.jsonl", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let logger = JsonlLogger::open(&path, LevelFilter::Info).unwrap();

        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("board")
                .args(format_args!("cascade {}", 2))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("board")
                .args(format_args!("filtered"))
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1);
        let v: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(v["level"], "INFO");
        assert_eq!(v["target"], "board");
        assert_eq!(v["msg"], "cascade 2");
        assert!(v["ts_ms"].as_u64().is_some());
        let _ = std::fs::remove_file(&path);
    }
}
