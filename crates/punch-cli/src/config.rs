//! Kiosk configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `<config dir>/punch/config.toml`
//! 3. the file passed with `--config`
//! 4. `PUNCH_*` environment variables (e.g. `PUNCH_DATABASE_PATH`, `PUNCH_UTC_OFFSET`)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::FixedOffset;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "PUNCH_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file holding employees, schedules and sessions.
    pub database_path: PathBuf,

    /// Offset the kiosk stamps events with, e.g. `-06:00`.
    ///
    /// Unset means the machine's local time zone. Useful when the kiosk runs
    /// on a host whose clock is kept in UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("punch.db"),
            utc_offset: None,
        }
    }
}

impl Config {
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let user_file = config_dir().map(|dir| dir.join("config.toml"));
        [user_file.as_deref(), config_path]
            .into_iter()
            .flatten()
            .fold(Figment::from(Serialized::defaults(Self::default())), |figment, path| {
                figment.merge(Toml::file(path))
            })
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
    }

    /// The configured event offset, if any.
    pub fn event_offset(&self) -> Result<Option<FixedOffset>> {
        self.utc_offset
            .as_deref()
            .map(|raw| {
                raw.parse::<FixedOffset>()
                    .with_context(|| format!("invalid utc_offset {raw:?} (expected e.g. -06:00)"))
            })
            .transpose()
    }
}

fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("punch"))
}

/// `~/.local/share/punch` on Linux.
fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("punch"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_database_lives_in_data_dir() {
        let config = Config::default();
        assert_eq!(config.database_path.file_name().unwrap(), "punch.db");
        assert_eq!(
            config.database_path.parent().unwrap().file_name().unwrap(),
            "punch"
        );
        assert_eq!(config.event_offset().unwrap(), None);
    }

    #[test]
    fn explicit_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("config.toml");
        std::fs::write(
            &config_path,
            "database_path = \"/srv/kiosk/punch.db\"\nutc_offset = \"-06:00\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&config_path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/srv/kiosk/punch.db"));
        assert_eq!(
            config.event_offset().unwrap(),
            FixedOffset::west_opt(6 * 3600)
        );
    }

    #[test]
    fn malformed_offset_is_reported() {
        let config = Config {
            utc_offset: Some("Mexico City".to_string()),
            ..Config::default()
        };
        let err = config.event_offset().unwrap_err();
        assert!(err.to_string().contains("invalid utc_offset"));
    }
}
