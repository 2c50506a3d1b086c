use crate::collaborator::{CollaboratorError, ensure_success};
use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

const SERVICE: &str = "speech synthesizer";

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";

/// Turns question text into spoken audio (MPEG bytes).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Bytes, CollaboratorError>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

pub struct SpeechClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    voice_id: String,
    model_id: String,
}

impl SpeechClient {
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_voice_id(mut self, voice_id: &str) -> Self {
        self.voice_id = voice_id.to_string();
        self
    }
}

#[async_trait]
impl SpeechSynthesizer for SpeechClient {
    async fn synthesize(&self, text: &str) -> Result<Bytes, CollaboratorError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(CollaboratorError::NotConfigured { service: SERVICE })?;

        let settings = VoiceSettings::default();
        let body = serde_json::json!({
            "text": text,
            "model_id": self.model_id,
            "voice_settings": {
                "stability": settings.stability,
                "similarity_boost": settings.similarity_boost
            }
        });

        let response = self
            .client
            .post(format!("{}/text-to-speech/{}", self.base_url, self.voice_id))
            .header("xi-api-key", api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&body)
            .send()
            .await
            .map_err(CollaboratorError::transport(SERVICE))?;

        ensure_success(SERVICE, response)
            .await?
            .bytes()
            .await
            .map_err(CollaboratorError::transport(SERVICE))
    }
}
