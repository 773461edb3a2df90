// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use sala_client::{ApiConfig, StaticSession};
use sala_core::{APP_NAME, Config as CoreConfig, expand_path, get_config_dir};

const SALA_CONFIG_ENV: &str = "SALA_CONFIG";
const SALA_TOKEN_ENV: &str = "SALA_TOKEN";

/// Loads and resolves the configuration file.
///
/// Priority: `--config` flag, then `SALA_CONFIG`, then
/// `$XDG_CONFIG_HOME/sala/config.toml`.
#[tracing::instrument]
pub async fn parse_config(
    path: Option<PathBuf>,
) -> Result<(CoreConfig, ApiConfig, StaticSession), Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(SALA_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            return Err(format!("No config found at: {}", config.display()).into());
        }
        config
    };

    let raw = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()?;

    let mut core = raw.core;
    core.normalize()?;

    let session = resolve_session(&raw.api).await?;
    let api = ApiConfig {
        base_url: raw.api.base_url,
        ..ApiConfig::default()
    };

    Ok((core, api, session))
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: CoreConfig,
    api: ApiSection,
}

/// The `[api]` table of the configuration file.
#[derive(Debug, serde::Deserialize)]
struct ApiSection {
    /// Base URL of the reservation backend.
    base_url: String,

    /// Bearer token, inline. `SALA_TOKEN` takes precedence.
    #[serde(default)]
    token: Option<String>,

    /// Path to a file holding the bearer token.
    #[serde(default)]
    token_file: Option<PathBuf>,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

/// Finds the bearer token: `SALA_TOKEN`, then `api.token`, then
/// `api.token_file`. No token at all yields an anonymous session; the
/// backend will answer 401 and the error is surfaced then.
async fn resolve_session(api: &ApiSection) -> Result<StaticSession, Box<dyn Error>> {
    if let Ok(token) = std::env::var(SALA_TOKEN_ENV) {
        return Ok(StaticSession::new(token.trim()));
    }
    if let Some(token) = &api.token {
        return Ok(StaticSession::new(token.as_str()));
    }
    if let Some(path) = &api.token_file {
        let path = expand_path(path)?;
        let token = fs::read_to_string(&path)
            .await
            .map_err(|e| format!("Failed to read token file at {}: {}", path.display(), e))?;
        return Ok(StaticSession::new(token.trim()));
    }

    tracing::warn!("no bearer token configured, requests will be anonymous");
    Ok(StaticSession::anonymous())
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use sala_client::Session;
    use std::fs;
    use std::sync::OnceLock;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn write_config(dir: &TempDir, name: &str, base_url: &str, extra: &str) -> PathBuf {
        let path = dir.path().join(name);
        let content = format!(
            r#"
[api]
base_url = "{base_url}"
{extra}
"#
        );
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let flag_path = write_config(&temp_dir, "flag.toml", "https://flag.example", "");
        let env_path = write_config(&temp_dir, "env.toml", "https://env.example", "");

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(SALA_TOKEN_ENV);
                std::env::set_var(SALA_CONFIG_ENV, env_path.to_str().unwrap());
            }

            let (_, api, _) = parse_config(Some(flag_path)).await.unwrap();
            assert_eq!(api.base_url, "https://flag.example");

            unsafe {
                std::env::remove_var(SALA_CONFIG_ENV);
            }
        }
    }

    #[tokio::test]
    async fn env_var_selects_config() {
        let temp_dir = TempDir::new().unwrap();
        let env_path = write_config(&temp_dir, "env.toml", "https://env.example", "");

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(SALA_TOKEN_ENV);
                std::env::set_var(SALA_CONFIG_ENV, env_path.to_str().unwrap());
            }

            let (core, api, _) = parse_config(None).await.unwrap();
            assert_eq!(api.base_url, "https://env.example");
            // Core section is optional and falls back to defaults.
            assert_eq!(core.slot_step_minutes, 30);

            unsafe {
                std::env::remove_var(SALA_CONFIG_ENV);
            }
        }
    }

    #[tokio::test]
    async fn inline_token_builds_a_signed_in_session() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            "config.toml",
            "https://api.example",
            r#"token = "abc123""#,
        );

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(SALA_TOKEN_ENV);
                std::env::remove_var(SALA_CONFIG_ENV);
            }

            let (_, _, session) = parse_config(Some(path)).await.unwrap();
            assert_eq!(session.token(), Some("abc123".to_string()));
        }
    }

    #[tokio::test]
    async fn token_file_is_read_and_trimmed() {
        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join("token");
        fs::write(&token_path, "abc123\n").unwrap();
        let extra = format!(
            "token_file = \"{}\"",
            token_path.to_str().unwrap().replace('\\', "/")
        );
        let path = write_config(&temp_dir, "config.toml", "https://api.example", &extra);

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(SALA_TOKEN_ENV);
                std::env::remove_var(SALA_CONFIG_ENV);
            }

            let (_, _, session) = parse_config(Some(path)).await.unwrap();
            assert_eq!(session.token(), Some("abc123".to_string()));
        }
    }

    #[tokio::test]
    async fn env_token_overrides_config_token() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            "config.toml",
            "https://api.example",
            r#"token = "from-file""#,
        );

        {
            let _guard = env_lock().lock().await;
            unsafe {
                std::env::remove_var(SALA_CONFIG_ENV);
                std::env::set_var(SALA_TOKEN_ENV, "from-env");
            }

            let (_, _, session) = parse_config(Some(path)).await.unwrap();
            assert_eq!(session.token(), Some("from-env".to_string()));

            unsafe {
                std::env::remove_var(SALA_TOKEN_ENV);
            }
        }
    }

    #[tokio::test]
    async fn missing_api_section_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[core]\nslot_step_minutes = 15\n").unwrap();

        let _guard = env_lock().lock().await;
        let result = parse_config(Some(path)).await;
        assert!(result.is_err());
    }
}
