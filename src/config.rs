//! Process configuration, read once at startup.
//!
//! Configuration is via environment variables:
//! - `NEWS_API_KEY` - News API key (required)
//! - `OPENAI_API_KEY` - Key for script generation and speech synthesis (required)
//! - `GITHUB_REPOSITORY_OWNER` - Owner of the publishing repository (required)
//! - `GITHUB_REPOSITORY` - `owner/name` of the publishing repository (required)
//! - `NEWS_API_URL` - News API base URL (default: `https://newsapi.org`)
//! - `OPENAI_BASE_URL` - OpenAI API base URL (default: `https://api.openai.com/v1`)
//! - `NEWSCAST_OUTPUT_DIR` - Directory for published artifacts (default: `.`)
//! - `NEWSCAST_TIMEOUT_SECS` - Timeout for generation and synthesis requests (default: 120)

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use newscast_core::RepoCoordinates;
use thiserror::Error;

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration errors, raised before any network call is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("Failed to load {path}: {reason}")]
    DotEnv { path: String, reason: String },
}

/// Load `.env` from the working directory into the process environment.
pub fn load_dotenv() -> Result<(), ConfigError> {
    load_dotenv_from(".env")
}

/// Load a dotenv file; only a missing file is ignored.
pub fn load_dotenv_from(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = path.as_ref();
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::DotEnv {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Everything a run needs, built before the first stage starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub news: NewsApiConfig,
    pub openai: OpenAiConfig,
    pub repo: RepoCoordinates,
    pub output_dir: PathBuf,
}

/// Headline source settings.
#[derive(Clone)]
pub struct NewsApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub country: String,
    pub category: String,
    pub timeout: Duration,
}

/// Script generation and speech synthesis settings.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub speech_model: String,
    pub voice: String,
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as absent. Required variables are checked
    /// in a fixed order so the first missing one is always reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let news_api_key = require("NEWS_API_KEY")?;
        let openai_api_key = require("OPENAI_API_KEY")?;
        let owner = require("GITHUB_REPOSITORY_OWNER")?;
        let slug = require("GITHUB_REPOSITORY")?;
        let name = repo_name_from_slug(&slug).ok_or_else(|| ConfigError::Invalid {
            var: "GITHUB_REPOSITORY",
            reason: format!("no repository name in '{}'", slug),
        })?;

        let timeout = match get("NEWSCAST_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "NEWSCAST_TIMEOUT_SECS",
                        reason: format!("expected a positive number of seconds, got '{}'", raw),
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let news_base = get("NEWS_API_URL").unwrap_or_else(|| DEFAULT_NEWS_API_URL.to_string());
        let openai_base =
            get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

        Ok(Self {
            news: NewsApiConfig {
                api_key: news_api_key,
                base_url: news_base.trim_end_matches('/').to_string(),
                country: "us".to_string(),
                category: "general".to_string(),
                timeout: FETCH_TIMEOUT,
            },
            openai: OpenAiConfig {
                api_key: openai_api_key,
                base_url: openai_base.trim_end_matches('/').to_string(),
                chat_model: "gpt-4o".to_string(),
                speech_model: "tts-1".to_string(),
                voice: "onyx".to_string(),
                timeout,
            },
            repo: RepoCoordinates::new(owner, name),
            output_dir: get("NEWSCAST_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

/// The repository name is the last `/` segment of an `owner/name` slug.
fn repo_name_from_slug(slug: &str) -> Option<&str> {
    slug.rsplit('/').next().filter(|name| !name.is_empty())
}

impl fmt::Debug for NewsApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("country", &self.country)
            .field("category", &self.category)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("speech_model", &self.speech_model)
            .field("voice", &self.voice)
            .field("timeout", &self.timeout)
            .finish()
    }
}
