use secrecy::SecretString;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Which browser origins may call the API.
#[derive(Clone, Debug, PartialEq)]
pub enum AllowedOrigin {
    Any,
    Exact(String),
}

/// Endpoint and credentials for one collaborator service.
#[derive(Debug, Default)]
pub struct ServiceConfig {
    pub api_key: Option<SecretString>,
    pub base_url: Option<String>,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub allowed_origin: AllowedOrigin,
    pub generation: ServiceConfig,
    pub generation_model: Option<String>,
    pub speech: ServiceConfig,
    pub speech_voice_id: Option<String>,
    pub transcription: ServiceConfig,
    pub prompts_dir: PathBuf,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// This function will look for a `.env` file in the current directory
    /// and load the following variables:
    ///
    /// *   `BIND_ADDRESS`: The address and port to bind the server to. Defaults to "0.0.0.0:3001".
    /// *   `ALLOWED_ORIGIN`: Browser origin allowed by CORS. Defaults to "http://localhost:3000"; "*" allows any.
    /// *   `GENERATION_API_KEY`, `GENERATION_BASE_URL`, `GENERATION_MODEL`: question generation service.
    /// *   `SPEECH_API_KEY`, `SPEECH_BASE_URL`, `SPEECH_VOICE_ID`: speech synthesis service.
    /// *   `TRANSCRIPTION_API_KEY`, `TRANSCRIPTION_BASE_URL`: transcription service.
    /// *   `PROMPTS_DIR`: (Optional) Directory of prompt templates. Defaults to "prompts".
    /// *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    ///
    /// Missing API keys are not fatal: the interview channel works without them,
    /// and the endpoints that need a collaborator answer with an error instead.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| var(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let secret = |key: &str| non_empty(key).map(SecretString::from);

        let bind_address_str =
            non_empty("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3001".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let allowed_origin = match non_empty("ALLOWED_ORIGIN").as_deref() {
            Some("*") => AllowedOrigin::Any,
            Some(origin) => AllowedOrigin::Exact(origin.to_string()),
            None => AllowedOrigin::Exact("http://localhost:3000".to_string()),
        };

        let log_level_str = non_empty("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            allowed_origin,
            generation: ServiceConfig {
                api_key: secret("GENERATION_API_KEY"),
                base_url: non_empty("GENERATION_BASE_URL"),
            },
            generation_model: non_empty("GENERATION_MODEL"),
            speech: ServiceConfig {
                api_key: secret("SPEECH_API_KEY"),
                base_url: non_empty("SPEECH_BASE_URL"),
            },
            speech_voice_id: non_empty("SPEECH_VOICE_ID"),
            transcription: ServiceConfig {
                api_key: secret("TRANSCRIPTION_API_KEY"),
                base_url: non_empty("TRANSCRIPTION_BASE_URL"),
            },
            prompts_dir: non_empty("PROMPTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("prompts")),
            log_level,
        })
    }
}
