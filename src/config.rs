//! Runtime settings for the terminal game.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. a JSON settings file: `$MATCH3_SETTINGS`, or `settings.json` in the
//!    platform data directory
//! 3. environment variables
//!
//! | Variable | Field |
//! |----------|-------|
//! | `MATCH3_ROWS` | `rows` |
//! | `MATCH3_COLUMNS` | `columns` |
//! | `MATCH3_SEED` | `seed` (0 = derive from the clock) |
//! | `MATCH3_FALL_DELAY_MS` | `fall_delay_ms` |
//! | `MATCH3_TICK_MS` | `tick_ms` |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::BoardConfig;
use crate::types::{DEFAULT_COLUMNS, DEFAULT_ROWS, FALL_DELAY_MS, TICK_MS};

pub const SETTINGS_ENV: &str = "MATCH3_SETTINGS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rows: usize,
    pub columns: usize,
    pub seed: u32,
    pub fall_delay_ms: u32,
    pub tick_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            seed: 0,
            fall_delay_ms: FALL_DELAY_MS,
            tick_ms: TICK_MS,
        }
    }
}

impl Settings {
    /// Defaults, then the settings file (if any), then the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(settings_path().as_deref(), |key| std::env::var(key).ok())
    }

    /// Like [`Settings::load`] with an explicit file and variable lookup.
    /// A missing file is created with the defaults so there is something to edit.
    pub fn load_from(path: Option<&Path>, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            Some(path) => {
                let defaults = Self::default();
                if let Err(e) = defaults.save(path) {
                    warn!("could not write default settings: {:#}", e);
                }
                defaults
            }
            None => Self::default(),
        };
        settings.apply_env(lookup);
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read settings from {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse settings in {}", path.display()))
    }

    /// Write pretty JSON through a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
        }
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_vec_pretty(self)?;
        fs::write(&tmp, data).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("replace {}", path.display()))?;
        Ok(())
    }

    /// Override fields from `lookup`. Unparsable values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            lookup(key).and_then(|v| v.trim().parse().ok())
        }

        if let Some(v) = parsed(&lookup, "MATCH3_ROWS") {
            self.rows = v;
        }
        if let Some(v) = parsed(&lookup, "MATCH3_COLUMNS") {
            self.columns = v;
        }
        if let Some(v) = parsed(&lookup, "MATCH3_SEED") {
            self.seed = v;
        }
        if let Some(v) = parsed(&lookup, "MATCH3_FALL_DELAY_MS") {
            self.fall_delay_ms = v;
        }
        if let Some(v) = parsed(&lookup, "MATCH3_TICK_MS") {
            self.tick_ms = v;
        }
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::new(self.rows, self.columns).with_fall_delay_ms(self.fall_delay_ms)
    }

    /// The configured seed, or one derived from the clock when it is 0.
    pub fn resolved_seed(&self) -> u32 {
        if self.seed != 0 {
            return self.seed;
        }
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
            .unwrap_or(1)
    }

    /// Frame interval, never zero.
    pub fn tick_ms(&self) -> u32 {
        self.tick_ms.max(1)
    }
}

/// `$MATCH3_SETTINGS`, else `settings.json` in the data directory.
pub fn settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("com", "tui-match3", "tui-match3")
        .map(|dirs| dirs.data_local_dir().join("settings.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn env_overrides_fields_and_ignores_garbage() {
        let env: HashMap<&str, &str> = [
            ("MATCH3_ROWS", "10"),
            ("MATCH3_COLUMNS", "nope"),
            ("MATCH3_SEED", " 99 "),
            ("MATCH3_TICK_MS", "33"),
        ]
        .into_iter()
        .collect();

        let mut s = Settings::default();
        s.apply_env(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(s.rows, 10);
        assert_eq!(s.columns, DEFAULT_COLUMNS);
        assert_eq!(s.seed, 99);
        assert_eq!(s.tick_ms, 33);
        assert_eq!(s.fall_delay_ms, FALL_DELAY_MS);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{"rows": 6, "seed": 5}"#).unwrap();
        assert_eq!(s.rows, 6);
        assert_eq!(s.seed, 5);
        assert_eq!(s.columns, DEFAULT_COLUMNS);
        assert_eq!(s.tick_ms, TICK_MS);
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("tui-match3-settings-{}", std::process::id()));
        let path = dir.join("settings.json");
        let s = Settings {
            rows: 5,
            columns: 7,
            seed: 12,
            fall_delay_ms: 100,
            tick_ms: 20,
        };
        s.save(&path).unwrap();
        assert_eq!(Settings::from_file(&path).unwrap(), s);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn first_load_writes_default_file() {
        let dir = std::env::temp_dir().join(format!("tui-match3-first-run-{}", std::process::id()));
        let path = dir.join("settings.json");
        let _ = fs::remove_dir_all(&dir);

        let loaded = Settings::load_from(Some(&path), |k| (k == "MATCH3_ROWS").then(|| "9".to_string())).unwrap();
        assert_eq!(loaded.rows, 9);
        assert!(path.exists());
        // The file holds the defaults; env overrides are not persisted.
        assert_eq!(Settings::from_file(&path).unwrap(), Settings::default());

        let again = Settings::load_from(Some(&path), |_| None).unwrap();
        assert_eq!(again, Settings::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn seed_and_board_config() {
        let s = Settings {
            seed: 7,
            fall_delay_ms: 250,
            ..Settings::default()
        };
        assert_eq!(s.resolved_seed(), 7);
        assert_eq!(s.board_config().fall_delay_ms, 250);
        assert_eq!(Settings { tick_ms: 0, ..s }.tick_ms(), 1);
    }
}
