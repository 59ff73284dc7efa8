//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Upstream APIs
//!
//! ```bash
//! export DUCK_API_URL="https://random-d.uk/api/v2/random"
//! export DOG_API_URL="https://random.dog/woof.json"
//! export DOG_FALLBACK_URL="https://dog.ceo/api/breeds/image/random"
//! export CAT_API_URL="https://api.thecatapi.com/v1/images/search"
//! ```
//!
//! The values above are the defaults; override them to point at mirrors or
//! local mock servers.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IP from proxy headers for rate limiting (default: `false`)
//! - `HTTP_TIMEOUT_SECONDS` - Per-request timeout for upstream fetches (default: 10)
//! - `HEALTH_TIMEOUT_SECONDS` - Per-probe timeout for health checks (default: 5)
//! - `AI_BACKEND` - Tool selector: `keyword`, `ollama`, `claude_haiku` or `claude_sonnet` (default: `keyword`)
//! - `OLLAMA_URL` - Ollama generate endpoint (default: `http://localhost:11434/api/generate`)
//! - `OLLAMA_MODEL` - Ollama model name (default: `llama3.2:3b`)
//! - `ANTHROPIC_API_KEY` - Required for the Claude backends
//! - `ANTHROPIC_URL` - Messages API endpoint (default: `https://api.anthropic.com/v1/messages`)
//! - `RATE_LIMIT_PER_MINUTE` - Requests per minute per client on `/api` and `/mcp` (default: 10)
//! - `ASSETS_DIR` - Directory served under `/assets` (default: `assets`)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

const DEFAULT_DUCK_API_URL: &str = "https://random-d.uk/api/v2/random";
const DEFAULT_DOG_API_URL: &str = "https://random.dog/woof.json";
const DEFAULT_DOG_FALLBACK_URL: &str = "https://dog.ceo/api/breeds/image/random";
const DEFAULT_CAT_API_URL: &str = "https://api.thecatapi.com/v1/images/search";

const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

const MAX_TIMEOUT_SECONDS: u64 = 120;

/// Base URLs of the upstream animal APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub duck_url: String,
    pub dog_url: String,
    pub dog_fallback_url: String,
    pub cat_url: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            duck_url: DEFAULT_DUCK_API_URL.to_string(),
            dog_url: DEFAULT_DOG_API_URL.to_string(),
            dog_fallback_url: DEFAULT_DOG_FALLBACK_URL.to_string(),
            cat_url: DEFAULT_CAT_API_URL.to_string(),
        }
    }
}

impl ApiEndpoints {
    /// Loads endpoint overrides, falling back to the public APIs.
    fn from_env() -> Self {
        Self {
            duck_url: env_or("DUCK_API_URL", DEFAULT_DUCK_API_URL),
            dog_url: env_or("DOG_API_URL", DEFAULT_DOG_API_URL),
            dog_fallback_url: env_or("DOG_FALLBACK_URL", DEFAULT_DOG_FALLBACK_URL),
            cat_url: env_or("CAT_API_URL", DEFAULT_CAT_API_URL),
        }
    }

    fn named(&self) -> [(&'static str, &str); 4] {
        [
            ("DUCK_API_URL", &self.duck_url),
            ("DOG_API_URL", &self.dog_url),
            ("DOG_FALLBACK_URL", &self.dog_fallback_url),
            ("CAT_API_URL", &self.cat_url),
        ]
    }
}

/// Which backend turns free-text queries into tool choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiBackend {
    Keyword,
    Ollama,
    ClaudeHaiku,
    ClaudeSonnet,
}

impl AiBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiBackend::Keyword => "keyword",
            AiBackend::Ollama => "ollama",
            AiBackend::ClaudeHaiku => "claude_haiku",
            AiBackend::ClaudeSonnet => "claude_sonnet",
        }
    }

    /// Model id and `max_tokens` for the Claude backends.
    pub fn claude_model(&self) -> Option<(&'static str, u32)> {
        match self {
            AiBackend::ClaudeHaiku => Some(("claude-3-haiku-20240307", 300)),
            AiBackend::ClaudeSonnet => Some(("claude-sonnet-4-5", 1000)),
            AiBackend::Keyword | AiBackend::Ollama => None,
        }
    }
}

impl FromStr for AiBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(AiBackend::Keyword),
            "ollama" => Ok(AiBackend::Ollama),
            "claude_haiku" => Ok(AiBackend::ClaudeHaiku),
            "claude_sonnet" => Ok(AiBackend::ClaudeSonnet),
            other => anyhow::bail!(
                "AI_BACKEND must be one of 'keyword', 'ollama', 'claude_haiku', 'claude_sonnet', got '{}'",
                other
            ),
        }
    }
}

impl fmt::Display for AiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// Timeout applied to each upstream fetch (`HTTP_TIMEOUT_SECONDS`, default: 10).
    pub http_timeout: Duration,
    /// Timeout applied to each health probe (`HEALTH_TIMEOUT_SECONDS`, default: 5).
    pub health_timeout: Duration,
    pub endpoints: ApiEndpoints,
    pub ai_backend: AiBackend,
    pub ollama_url: String,
    pub ollama_model: String,
    /// Required when `ai_backend` is a Claude backend. Never logged.
    pub anthropic_api_key: Option<String>,
    pub anthropic_url: String,
    pub rate_limit_per_minute: u32,
    pub assets_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            http_timeout: Duration::from_secs(10),
            health_timeout: Duration::from_secs(5),
            endpoints: ApiEndpoints::default(),
            ai_backend: AiBackend::Keyword,
            ollama_url: "http://localhost:11434/api/generate".to_string(),
            ollama_model: "llama3.2:3b".to_string(),
            anthropic_api_key: None,
            anthropic_url: DEFAULT_ANTHROPIC_URL.to_string(),
            rate_limit_per_minute: 10,
            assets_dir: "assets".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `AI_BACKEND` names an unknown backend.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let listen_addr = env_or("LISTEN", &defaults.listen_addr);
        let log_level = env_or("RUST_LOG", &defaults.log_level);
        let log_format = env_or("LOG_FORMAT", &defaults.log_format);

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let http_timeout = env::var("HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.http_timeout);

        let health_timeout = env::var("HEALTH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.health_timeout);

        let ai_backend = match env::var("AI_BACKEND") {
            Ok(v) => v.parse().context("Failed to parse AI_BACKEND")?,
            Err(_) => defaults.ai_backend,
        };

        let rate_limit_per_minute = env::var("RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.rate_limit_per_minute);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            http_timeout,
            health_timeout,
            endpoints: ApiEndpoints::from_env(),
            ai_backend,
            ollama_url: env_or("OLLAMA_URL", &defaults.ollama_url),
            ollama_model: env_or("OLLAMA_MODEL", &defaults.ollama_model),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            anthropic_url: env_or("ANTHROPIC_URL", &defaults.anthropic_url),
            rate_limit_per_minute,
            assets_dir: env_or("ASSETS_DIR", &defaults.assets_dir),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a timeout is zero or above 120 seconds
    /// - an upstream or selector URL is not a valid HTTP(S) URL
    /// - a Claude backend is chosen without `ANTHROPIC_API_KEY`
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `rate_limit_per_minute` is zero
    pub fn validate(&self) -> Result<()> {
        for (name, timeout) in [
            ("HTTP_TIMEOUT_SECONDS", self.http_timeout),
            ("HEALTH_TIMEOUT_SECONDS", self.health_timeout),
        ] {
            if timeout.is_zero() || timeout.as_secs() > MAX_TIMEOUT_SECONDS {
                anyhow::bail!(
                    "{} must be between 1 and {}, got {}",
                    name,
                    MAX_TIMEOUT_SECONDS,
                    timeout.as_secs()
                );
            }
        }

        for (name, value) in self.endpoints.named() {
            validate_http_url(name, value)?;
        }
        match self.ai_backend {
            AiBackend::Ollama => validate_http_url("OLLAMA_URL", &self.ollama_url)?,
            AiBackend::ClaudeHaiku | AiBackend::ClaudeSonnet => {
                if self.anthropic_api_key.is_none() {
                    anyhow::bail!(
                        "ANTHROPIC_API_KEY is required when AI_BACKEND is '{}'",
                        self.ai_backend
                    );
                }
                validate_http_url("ANTHROPIC_URL", &self.anthropic_url)?;
            }
            AiBackend::Keyword => {}
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.rate_limit_per_minute == 0 {
            anyhow::bail!("RATE_LIMIT_PER_MINUTE must be at least 1");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Duck API: {}", self.endpoints.duck_url);
        tracing::info!(
            "  Dog API: {} (fallback: {})",
            self.endpoints.dog_url,
            self.endpoints.dog_fallback_url
        );
        tracing::info!("  Cat API: {}", self.endpoints.cat_url);
        tracing::info!("  HTTP timeout: {}s", self.http_timeout.as_secs());

        match self.ai_backend {
            AiBackend::Ollama => tracing::info!(
                "  AI backend: ollama ({} at {})",
                self.ollama_model,
                self.ollama_url
            ),
            AiBackend::ClaudeHaiku | AiBackend::ClaudeSonnet => tracing::info!(
                "  AI backend: {} ({})",
                self.ai_backend,
                self.anthropic_url
            ),
            AiBackend::Keyword => tracing::info!("  AI backend: keyword"),
        }

        tracing::info!("  Rate limit: {}/minute", self.rate_limit_per_minute);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn validate_http_url(name: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL: '{}'", name, value))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => anyhow::bail!(
            "{} must use http:// or https://, got '{}://'",
            name,
            scheme
        ),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
