// src/config.rs

use crate::listing::SortKey;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const ENDPOINT_VAR: &str = "PROPERTY_LISTING_ENDPOINT";
pub const SECTION_VAR: &str = "PROPERTY_LISTING_SECTION";
pub const DEFAULT_SORT_VAR: &str = "PROPERTY_LISTING_DEFAULT_SORT";
pub const TIMEOUT_VAR: &str = "PROPERTY_LISTING_TIMEOUT_SECS";
pub const PLACEHOLDER_VAR: &str = "PROPERTY_LISTING_PLACEHOLDER_IMAGE";
pub const DISABLE_NEXT_VAR: &str = "PROPERTY_LISTING_DISABLE_NEXT_ON_EMPTY";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const MAX_WORKERS_VAR: &str = "MAX_WORKERS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_MAX_WORKERS: usize = 8;
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_PLACEHOLDER: &str = "/placeholder.png";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub listing: ListingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
}

/// Everything the listing controller needs to know about the upstream.
#[derive(Debug, Clone)]
pub struct ListingSettings {
    /// Missing is allowed at startup; every listing request then reports a
    /// configuration error instead of guessing an endpoint.
    pub endpoint: Option<String>,
    pub section: Option<String>,
    pub default_sort: SortKey,
    pub timeout: Duration,
    pub placeholder_image: String,
    pub disable_next_on_empty: bool,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            section: None,
            default_sort: SortKey::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            placeholder_image: DEFAULT_PLACEHOLDER.to_string(),
            disable_next_on_empty: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server = ServerConfig {
            bind_addr: parse_or(BIND_ADDR_VAR, get(BIND_ADDR_VAR), DEFAULT_BIND_ADDR.parse().ok())?,
            max_workers: parse_or(MAX_WORKERS_VAR, get(MAX_WORKERS_VAR), Some(DEFAULT_MAX_WORKERS))?,
        };

        let defaults = ListingSettings::default();
        let timeout_secs: u64 = parse_or(TIMEOUT_VAR, get(TIMEOUT_VAR), Some(DEFAULT_TIMEOUT_SECS))?;

        let listing = ListingSettings {
            endpoint: get(ENDPOINT_VAR),
            section: get(SECTION_VAR),
            default_sort: parse_or(DEFAULT_SORT_VAR, get(DEFAULT_SORT_VAR), Some(defaults.default_sort))?,
            timeout: Duration::from_secs(timeout_secs),
            placeholder_image: get(PLACEHOLDER_VAR).unwrap_or(defaults.placeholder_image),
            disable_next_on_empty: match get(DISABLE_NEXT_VAR) {
                Some(raw) => parse_flag(DISABLE_NEXT_VAR, &raw)?,
                None => defaults.disable_next_on_empty,
            },
        };

        Ok(Config { server, listing })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: Option<T>) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
        None => default.ok_or_else(|| ConfigError::Invalid {
            key,
            value: String::new(),
            reason: "no default available".into(),
        }),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "expected true or false".into(),
        }),
    }
}
