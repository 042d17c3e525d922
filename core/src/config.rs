// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de;

use crate::{DEFAULT_POLL_INTERVAL, Error};

/// The name of the application.
pub const APP_NAME: &str = "almanac";

/// File name of the database inside the state directory.
const DATABASE_FILE: &str = "almanac.db";

/// Configuration for the core.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database holding events and contacts.
    pub database_path: Option<PathBuf>,

    /// Directory for storing application state.
    pub state_dir: Option<PathBuf>,

    /// Sound used for new alarms and for stored alarms without one.
    pub alarm_sound: String,

    /// Time between two scans of the alarm poller.
    pub poll_interval: ConfigInterval,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            state_dir: None,
            alarm_sound: "alarm.wav".to_string(),
            poll_interval: ConfigInterval(DEFAULT_POLL_INTERVAL),
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Error> {
        // Normalize state directory
        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(expand_path(a).map_err(|e| {
                    Error::Config(format!("Failed to expand state directory path: {e}"))
                })?)
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!(err = %e, "failed to get state directory"),
            },
        };

        // Normalize database path
        if let Some(path) = &self.database_path {
            self.database_path = Some(expand_path(path).map_err(|e| {
                Error::Config(format!("Failed to expand database path: {e}"))
            })?);
        }

        Ok(())
    }

    /// The database file to use, falling back to one inside the state directory.
    pub fn database_file(&self) -> Result<PathBuf, Error> {
        match (&self.database_path, &self.state_dir) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(dir)) => Ok(dir.join(DATABASE_FILE)),
            (None, None) => Err(Error::Config(
                "No database path configured and no state directory available".to_string(),
            )),
        }
    }
}

/// A polling interval written as "HH:MM", "1d", "2h", "5m" or "20s".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigInterval(Duration);

impl ConfigInterval {
    pub fn get(&self) -> Duration {
        self.0
    }
}

impl Default for ConfigInterval {
    fn default() -> Self {
        Self(DEFAULT_POLL_INTERVAL)
    }
}

impl<'de> serde::Deserialize<'de> for ConfigInterval {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IntervalVisitor;

        impl<'de> de::Visitor<'de> for IntervalVisitor {
            type Value = ConfigInterval;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a duration string like "HH:MM", "1d", "2h", "5m", or "20s""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                match parse_duration(value) {
                    Ok(d) if d.is_zero() => Err(de::Error::custom("interval must be positive")),
                    Ok(d) => Ok(ConfigInterval(d)),
                    Err(e) => Err(de::Error::custom(e)),
                }
            }
        }

        deserializer.deserialize_str(IntervalVisitor)
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let path = path.to_str().ok_or("Invalid path")?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_home_dir()?.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = path.strip_prefix(prefix) {
            return Ok(get_config_dir()?.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_home_dir() -> Result<PathBuf, String> {
    dirs::home_dir().ok_or_else(|| "User-specific home directory not found".to_string())
}

/// The user's configuration directory, `$XDG_CONFIG_HOME` on unix.
pub fn get_config_dir() -> Result<PathBuf, String> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific config directory not found".to_string())
}

fn get_state_dir() -> Result<PathBuf, String> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(not(unix))]
    let state_dir = dirs::data_dir();
    state_dir.ok_or_else(|| "User-specific state directory not found".to_string())
}

/// Parse a duration string in the format "HH:MM" / "1d" / "2h" / "5m" / "20s".
fn parse_duration(s: &str) -> Result<Duration, String> {
    let number = |n: &str| -> Result<u64, String> {
        n.trim()
            .parse()
            .map_err(|e| format!("Invalid duration {s:?}: {e}"))
    };

    let scaled = |n: &str, factor: u64| -> Result<u64, String> {
        number(n)?
            .checked_mul(factor)
            .ok_or_else(|| format!("Invalid duration {s:?}: too large"))
    };

    // Try to parse "HH:MM" format
    let secs = if let Some((h, m)) = s.split_once(':') {
        scaled(h, 3600)?
            .checked_add(scaled(m, 60)?)
            .ok_or_else(|| format!("Invalid duration {s:?}: too large"))?
    }
    // Match suffix-based formats
    else if let Some(rest) = s.strip_suffix('d') {
        scaled(rest, 86_400)?
    } else if let Some(rest) = s.strip_suffix('h') {
        scaled(rest, 3600)?
    } else if let Some(rest) = s.strip_suffix('m') {
        scaled(rest, 60)?
    } else if let Some(rest) = s.strip_suffix('s') {
        number(rest)?
    } else {
        return Err(format!("Invalid duration format: {s}"));
    };
    Ok(Duration::from_secs(secs))
}
