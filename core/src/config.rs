// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::{Path, PathBuf};

use crate::schedule::{CalendarView, WorkingHours};

/// The name of the sala application.
pub const APP_NAME: &str = "sala";

/// Configuration for the sala application.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// Daily hours selections are clamped to.
    #[serde(default)]
    pub working_hours: WorkingHoursConfig,

    /// Granularity, in minutes, a single click expands to.
    #[serde(default = "default_slot_step")]
    pub slot_step_minutes: u32,

    /// Calendar layout shown when none is requested.
    #[serde(default)]
    pub default_view: CalendarView,

    /// Directory for storing application state.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
}

/// [`WorkingHours`] with serde defaults, so a config file may set only one
/// bound or omit the table entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(from = "PartialWorkingHours")]
pub struct WorkingHoursConfig(pub WorkingHours);

impl Default for WorkingHoursConfig {
    fn default() -> Self {
        Self(WorkingHours::default())
    }
}

#[derive(serde::Deserialize)]
struct PartialWorkingHours {
    start: Option<chrono::NaiveTime>,
    end: Option<chrono::NaiveTime>,
}

impl From<PartialWorkingHours> for WorkingHoursConfig {
    fn from(partial: PartialWorkingHours) -> Self {
        let defaults = WorkingHours::default();
        Self(WorkingHours {
            start: partial.start.unwrap_or(defaults.start),
            end: partial.end.unwrap_or(defaults.end),
        })
    }
}

fn default_slot_step() -> u32 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            working_hours: WorkingHoursConfig::default(),
            slot_step_minutes: default_slot_step(),
            default_view: CalendarView::default(),
            state_dir: None,
        }
    }
}

impl Config {
    /// Normalize the configuration.
    pub fn normalize(&mut self) -> Result<(), Box<dyn Error>> {
        if self.slot_step_minutes == 0 {
            return Err("slot_step_minutes must be positive".into());
        }
        if self.working_hours.0.end <= self.working_hours.0.start {
            return Err("working_hours.end must be after working_hours.start".into());
        }

        match &self.state_dir {
            Some(a) => {
                self.state_dir = Some(
                    expand_path(a)
                        .map_err(|e| format!("Failed to expand state directory path: {e}"))?,
                )
            }

            None => match get_state_dir() {
                Ok(a) => self.state_dir = Some(a.join(APP_NAME)),
                Err(e) => tracing::warn!("Failed to get state directory: {e}"),
            },
        };

        Ok(())
    }

    pub fn working_hours(&self) -> WorkingHours {
        self.working_hours.0
    }
}

/// Handle tilde (~) and environment variables in the path
pub fn expand_path(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
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

fn get_home_dir() -> Result<PathBuf, Box<dyn Error>> {
    dirs::home_dir().ok_or("User-specific home directory not found".into())
}

pub fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir.ok_or("User-specific config directory not found".into())
}

fn get_state_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let state_dir = xdg::BaseDirectories::new().get_state_home();
    #[cfg(windows)]
    let state_dir = dirs::data_dir();
    state_dir.ok_or("User-specific state directory not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_expand_path_home_env() {
        let home = get_home_dir().unwrap();
        let home_prefixes: &[&str] = if cfg!(unix) {
            &["~", "$HOME", "${HOME}"]
        } else {
            &[r"~", r"%UserProfile%"]
        };
        for prefix in home_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/Documents"))).unwrap();
            assert_eq!(result, home.join("Documents"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_config() {
        let config_dir = get_config_dir().unwrap();
        let config_prefixes: &[&str] = if cfg!(unix) {
            &["$XDG_CONFIG_HOME", "${XDG_CONFIG_HOME}"]
        } else {
            &[r"%LOCALAPPDATA%"]
        };
        for prefix in config_prefixes {
            let result = expand_path(&PathBuf::from(format!("{prefix}/config.toml"))).unwrap();
            assert_eq!(result, config_dir.join("config.toml"));
            assert!(result.is_absolute());
        }
    }

    #[test]
    fn test_expand_path_absolute() {
        let absolute_path = PathBuf::from("/etc/passwd");
        let result = expand_path(&absolute_path).unwrap();
        assert_eq!(result, absolute_path);
    }

    #[test]
    fn test_expand_path_relative() {
        let relative_path = PathBuf::from("relative/path/to/file");
        let result = expand_path(&relative_path).unwrap();
        assert_eq!(result, relative_path);
    }

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.slot_step_minutes, 30);
        assert_eq!(config.default_view, CalendarView::Week);
        assert_eq!(config.working_hours(), WorkingHours::default());
    }

    #[test]
    fn test_partial_working_hours() {
        let config: Config = toml::from_str(
            r#"
            [working_hours]
            end = "22:00:00"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.working_hours().start,
            NaiveTime::from_hms_opt(6, 0, 0).unwrap()
        );
        assert_eq!(
            config.working_hours().end,
            NaiveTime::from_hms_opt(22, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_normalize_rejects_bad_values() {
        let mut config = Config {
            slot_step_minutes: 0,
            ..Config::default()
        };
        assert!(config.normalize().is_err());

        let mut config: Config = toml::from_str(
            r#"
            slot_step_minutes = 15
            [working_hours]
            start = "20:00:00"
            end = "06:00:00"
            "#,
        )
        .unwrap();
        assert!(config.normalize().is_err());
    }
}
