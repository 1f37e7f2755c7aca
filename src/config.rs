//! Process configuration, read once at startup and shared immutably through `Arc<Config>`.
//!
//! Values come from the environment (a `.env` file is loaded first when present).
//! Only the Discord token is mandatory; every other service degrades to an error
//! reply when its settings are missing.

use crate::constants::{
    DEFAULT_APP_SERVER_VMID, DEFAULT_GITHUB_USER, DEFAULT_LAVALINK_HOST,
    DEFAULT_LAVALINK_PASSWORD,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN not set.")]
    MissingDiscordToken,
    #[error("{var} must be a number, got `{value}`")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must be true/false, got `{value}`")]
    InvalidFlag { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct PveConfig {
    pub host: String,
    pub user: String,
    pub token_name: String,
    pub token_value: String,
    pub verify_tls: bool,
}

#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Owner used when `ghcommits` is given a bare repo name.
    pub default_owner: String,
    /// Empty means "no default repo"; `ghcommits` without arguments then asks for one.
    pub default_repo: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LavalinkConfig {
    pub host: String,
    pub password: String,
    pub ssl: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub pve: PveConfig,
    pub github: GithubConfig,
    pub lavalink: LavalinkConfig,
    pub app_server_vmid: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string());
        let get_or = |key: &str, default: &str| {
            get(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let discord_token = get("DISCORD_TOKEN")
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingDiscordToken)?;

        let pve = PveConfig {
            host: get_or("PVE_HOST", ""),
            user: get_or("PVE_USER", ""),
            token_name: get_or("PVE_TOKEN_NAME", ""),
            token_value: get_or("PVE_TOKEN_VALUE", ""),
            verify_tls: parse_flag("PVE_VERIFY_TLS", get("PVE_VERIFY_TLS"), false)?,
        };

        let github = GithubConfig {
            default_owner: get_or("GITHUB_USER", DEFAULT_GITHUB_USER),
            default_repo: get_or("GITHUB_REPO", ""),
            token: get("GITHUB_TOKEN").filter(|t| !t.is_empty()),
        };

        let lavalink = LavalinkConfig {
            host: get_or("LAVALINK_HOST", DEFAULT_LAVALINK_HOST),
            password: get_or("LAVALINK_PASSWORD", DEFAULT_LAVALINK_PASSWORD),
            ssl: parse_flag("LAVALINK_SSL", get("LAVALINK_SSL"), false)?,
        };

        let app_server_vmid = match get("APP_SERVER_VMID").filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse::<u32>().map_err(|_| ConfigError::InvalidNumber {
                var: "APP_SERVER_VMID",
                value: raw,
            })?,
            None => DEFAULT_APP_SERVER_VMID,
        };

        Ok(Self {
            discord_token,
            pve,
            github,
            lavalink,
            app_server_vmid,
        })
    }
}

fn parse_flag(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value: raw }),
    }
}
