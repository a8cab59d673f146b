use std::env;
use std::time::Duration;

use crate::error::ConfigError;

/// Backend used when running in dev mode without an explicit base URL
pub const DEV_API_BASE_URL: &str = "http://localhost:8000";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Status checks must never hang the client, even if the backend is unreachable
pub const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(12);
/// A full-year sync over many mails can take minutes
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(15 * 60);
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the invoice backend, without trailing slash
    pub api_base_url: String,
    /// Dev mode keeps plain `http://` base URLs; otherwise they are upgraded to https
    pub dev_mode: bool,
    pub request_timeout: Duration,
    pub status_timeout: Duration,
    pub sync_timeout: Duration,
    /// Default invoice listing window (last N days)
    pub default_window_days: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dev_mode = match lookup("INVOICE_DEV") {
            Some(value) => parse_flag("INVOICE_DEV", &value)?,
            None => false,
        };

        let api_base_url = match lookup("INVOICE_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url.trim().to_string(),
            None if dev_mode => DEV_API_BASE_URL.to_string(),
            None => return Err(ConfigError::Missing("INVOICE_API_BASE_URL")),
        };

        Ok(Self {
            api_base_url,
            dev_mode,
            request_timeout: secs_or(
                &lookup,
                "INVOICE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT,
            )?,
            status_timeout: secs_or(
                &lookup,
                "INVOICE_STATUS_TIMEOUT_SECS",
                DEFAULT_STATUS_TIMEOUT,
            )?,
            sync_timeout: secs_or(&lookup, "INVOICE_SYNC_TIMEOUT_SECS", DEFAULT_SYNC_TIMEOUT)?,
            default_window_days: match lookup("INVOICE_DEFAULT_WINDOW_DAYS") {
                Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "INVOICE_DEFAULT_WINDOW_DAYS",
                    value: value.clone(),
                })?,
                None => DEFAULT_WINDOW_DAYS,
            },
        })
    }

    /// Dev-mode config pointing at a local backend
    pub fn dev() -> Self {
        Self {
            api_base_url: DEV_API_BASE_URL.to_string(),
            dev_mode: true,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            default_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

fn secs_or<F>(lookup: &F, name: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::Invalid {
                name,
                value: value.clone(),
            }),
        None => Ok(default),
    }
}
