use std::env;
use std::path::PathBuf;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CARD_TEMPLATES_PATH: &str = "cards.json";

/// Process settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub card_templates_path: PathBuf,
    /// Fixed master seed; `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
    /// Validated browser origins; empty means localhost only.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            card_templates_path: PathBuf::from(DEFAULT_CARD_TEMPLATES_PATH),
            rng_seed: None,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let port = match var("BACKEND_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => defaults.port,
        };

        let rng_seed = match var("GAME_RNG_SEED") {
            Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
                AppError::config(format!("GAME_RNG_SEED must be an unsigned integer, got '{raw}'"))
            })?),
            None => None,
        };

        Ok(Self {
            host: var("BACKEND_HOST").unwrap_or(defaults.host),
            port,
            card_templates_path: var("CARD_TEMPLATES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.card_templates_path),
            rng_seed,
            cors_allowed_origins: parse_origins(&var("CORS_ALLOWED_ORIGINS").unwrap_or_default()),
        })
    }
}

/// Comma-separated origins; empty, `null` and non-http(s) entries are dropped.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.to_string())
        .collect()
}
