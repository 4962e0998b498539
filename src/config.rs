//! Configuration management for reddit-get.
//!
//! Credentials are resolved once at startup in this order:
//! 1. Environment variables (`REDDIT_CLIENT_ID`, `REDDIT_CLIENT_SECRET`,
//!    `REDDIT_USER_AGENT`), optionally seeded from a `.env` file in the local
//!    data directory.
//! 2. A TOML config file, `~/.redditgetrc` unless another path is given:
//!
//! ```toml
//! [reddit-get]
//! client_id = "testid"
//! client_secret = "testsecret"
//! user_agent = "testuseragent"
//! # legacy full-auth mode
//! username = "testusername"
//! password = "testpassword"
//! ```

use std::{
    env,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::{Res, error::Error, types::Credentials, utils};

pub const DEFAULT_CONFIG_PATH: &str = "~/.redditgetrc";
pub const CONFIG_SECTION: &str = "reddit-get";
pub const REQUIRED_KEYS: [&str; 3] = ["client_id", "client_secret", "user_agent"];
pub const DEFAULT_USER_AGENT: &str = concat!("reddit-get/", env!("CARGO_PKG_VERSION"));

pub const ENV_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
pub const ENV_USER_AGENT: &str = "REDDIT_USER_AGENT";

/// Loads environment variables from `<data_local_dir>/reddit-get/.env`.
///
/// The file is optional. Variables already present in the environment win
/// over the ones in the file.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/reddit-get/.env`
/// - macOS: `~/Library/Application Support/reddit-get/.env`
/// - Windows: `%LOCALAPPDATA%/reddit-get/.env`
pub async fn load_env() -> Res<()> {
    let path = env_file_path();
    if async_fs::metadata(&path).await.is_err() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map_err(|e| Error::Io(io::Error::new(ErrorKind::InvalidData, e.to_string())))?;
    Ok(())
}

pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("reddit-get/.env");
    path
}

impl Credentials {
    /// Application-only credentials from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Same as [`Credentials::from_env`] with a custom variable lookup.
    ///
    /// Returns `None` unless both client id and secret are set; the user
    /// agent falls back to [`DEFAULT_USER_AGENT`].
    pub fn from_env_with<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Some(Self {
            client_id: var(ENV_CLIENT_ID)?,
            client_secret: var(ENV_CLIENT_SECRET)?,
            user_agent: var(ENV_USER_AGENT).unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            username: None,
            password: None,
        })
    }

    /// Reads the `[reddit-get]` table of a TOML config file.
    pub async fn from_file(path: &Path) -> Res<Self> {
        let content = match async_fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let configs: toml::Table = content.parse().map_err(|source| Error::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })?;

        let section = match configs.get(CONFIG_SECTION) {
            Some(toml::Value::Table(section)) => section,
            _ => return Err(Error::MissingSection(path.to_path_buf())),
        };

        let missing: Vec<&str> = REQUIRED_KEYS
            .into_iter()
            .filter(|key| !section.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingKeys {
                path: path.to_path_buf(),
                keys: missing.join(", "),
            });
        }

        toml::Value::Table(section.clone())
            .try_into()
            .map_err(|source| Error::InvalidConfig {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Resolves credentials for `config`: environment first, file second.
    ///
    /// Returns the expanded config path together with the credentials, the
    /// path being reported by `config-location` even when the environment
    /// supplied the credentials.
    pub async fn load(config: &str) -> Res<(PathBuf, Self)> {
        Self::load_with(config, |key| env::var(key).ok()).await
    }

    pub async fn load_with<F>(config: &str, lookup: F) -> Res<(PathBuf, Self)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = utils::expand_home(config);
        if let Some(credentials) = Self::from_env_with(lookup) {
            return Ok((config_path, credentials));
        }

        let credentials = Self::from_file(&config_path).await?;
        Ok((config_path, credentials))
    }
}
