//! Client configuration.

use hayat_types::ConfigError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "API_KEY";

const BASE_URL_ENV: &str = "HAYAT_BASE_URL";
const TIMEOUT_ENV: &str = "HAYAT_TIMEOUT_SECS";
const POLL_INTERVAL_ENV: &str = "HAYAT_POLL_INTERVAL_SECS";
const MAX_POLL_ATTEMPTS_ENV: &str = "HAYAT_MAX_POLL_ATTEMPTS";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Persona given to every conversation.
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful and creative AI assistant named Hayat Ai. \
Your creator is Hayat Khan. When asked who you are or who made you, mention you are powered by Hayat Khan.";

/// Model identifiers per capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub chat: String,
    pub document: String,
    pub image: String,
    pub video: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            chat: "gemini-2.5-flash".to_string(),
            document: "gemini-2.5-flash".to_string(),
            image: "imagen-4.0-generate-001".to_string(),
            video: "veo-2.0-generate-001".to_string(),
        }
    }
}

/// Video operation polling.
///
/// `max_attempts: None` polls until the backend reports done, however long that takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval_secs: u64,
    pub max_attempts: Option<u32>,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval_secs: 10, max_attempts: None }
    }
}

/// Configuration for the generation client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Gemini API key.
    pub api_key: String,
    /// Base URL of the Gemini REST API, without trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds (covers streamed bodies and video downloads).
    pub timeout_secs: u64,
    pub models: ModelConfig,
    pub system_instruction: String,
    pub poll: PollConfig,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 300,
            models: ModelConfig::default(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            poll: PollConfig::default(),
        }
    }

    /// Build from process environment. Missing `API_KEY` is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test fixtures).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::missing(API_KEY_ENV))?;

        let mut config = Self::new(api_key);

        if let Some(raw) = lookup(BASE_URL_ENV) {
            let base_url = raw.trim().trim_end_matches('/').to_string();
            if !base_url.is_empty() {
                url::Url::parse(&base_url)
                    .map_err(|e| ConfigError::invalid(BASE_URL_ENV, e.to_string()))?;
                tracing::info!("Using custom Gemini base URL");
                config.base_url = base_url;
            }
        }

        if let Some(timeout) = parse_number::<u64, _>(&lookup, TIMEOUT_ENV)? {
            config.timeout_secs = timeout.max(5);
        }
        if let Some(interval) = parse_number::<u64, _>(&lookup, POLL_INTERVAL_ENV)? {
            config.poll.interval_secs = interval;
        }
        if let Some(max) = parse_number::<u32, _>(&lookup, MAX_POLL_ATTEMPTS_ENV)? {
            config.poll.max_attempts = Some(max);
        }

        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("models", &self.models)
            .field("poll", &self.poll)
            .finish_non_exhaustive()
    }
}

fn parse_number<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(raw) => raw.parse::<T>().map(Some).map_err(|e| ConfigError::invalid(key, e.to_string())),
        None => Ok(None),
    }
}
