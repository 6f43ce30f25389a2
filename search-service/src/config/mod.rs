use secrecy::Secret;
use service_core::config::{self as core_config, get_env, get_optional_env};
use service_core::error::AppError;
use std::time::Duration;

/// Gemini API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_PRIMARY_MODEL: &str = "models/gemini-2.5-flash";
pub const DEFAULT_FALLBACK_MODEL: &str = "models/gemini-flash-latest";

/// Origins of the local web frontend (Vite dev server and nginx proxy).
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173,http://localhost,http://127.0.0.1,http://localhost:80";

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub models: ModelSelection,
    pub cors: CorsConfig,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub api_base: String,
    /// Per-request timeout; `None` waits for the provider indefinitely.
    pub timeout: Option<Duration>,
}

/// Model identifiers tried in order by the answer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub primary: String,
    pub fallback: String,
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_MODEL.to_string(),
            fallback: DEFAULT_FALLBACK_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

impl SearchConfig {
    /// Load configuration from the environment (and `.env`).
    ///
    /// A missing `GEMINI_API_KEY` is a startup failure.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        let timeout = match get_optional_env("GEMINI_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(raw.trim().parse().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?)),
            None => None,
        };

        Ok(SearchConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None)?),
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE))?,
                timeout,
            },
            models: ModelSelection {
                primary: get_env("GEMINI_PRIMARY_MODEL", Some(DEFAULT_PRIMARY_MODEL))?,
                fallback: get_env("GEMINI_FALLBACK_MODEL", Some(DEFAULT_FALLBACK_MODEL))?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    Some(DEFAULT_ALLOWED_ORIGINS),
                )?),
            },
            log_level: get_env("LOG_LEVEL", Some("info"))?,
            otlp_endpoint: get_optional_env("OTLP_ENDPOINT"),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
