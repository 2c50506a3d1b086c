use crate::collaborator::{CollaboratorError, ensure_success};
use crate::profile::CandidateProfile;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;

const SERVICE: &str = "question generator";

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-chat";

/// Prompt keys looked up in the loaded prompt directory.
pub const SYSTEM_PROMPT_KEY: &str = "interviewer_system";
pub const QUESTION_PROMPT_KEY: &str = "interviewer_question";

const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional AI interviewer.";

const DEFAULT_QUESTION_PROMPT: &str = "You are an AI interviewer conducting a {job_role} interview.
Candidate details:
- Name: {name}
- Experience: {experience}
- Skills: {skills}
- Previous response: {previous_response}

Generate question {question_number} of 10. Make it relevant to their role and experience level.
Keep it conversational and professional. Return only the question.";

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub content: String,
}

/// Input for one generated question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    pub user_profile: CandidateProfile,
    pub question_number: u32,
    #[serde(default)]
    pub previous_response: Option<String>,
}

/// Produces interview question text from a profile and turn metadata.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_question(&self, request: &QuestionRequest)
    -> Result<String, CollaboratorError>;
}

/// Chat-completions client for any OpenAI compatible endpoint.
pub struct InterviewerClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    system_prompt: String,
    question_prompt: String,
}

impl InterviewerClient {
    pub fn new(api_key: Option<SecretString>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            question_prompt: DEFAULT_QUESTION_PROMPT.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Overrides the built-in templates with any loaded from disk.
    pub fn with_prompts(mut self, prompts: &HashMap<String, String>) -> Self {
        if let Some(system) = prompts.get(SYSTEM_PROMPT_KEY) {
            self.system_prompt = system.trim().to_string();
        }
        if let Some(question) = prompts.get(QUESTION_PROMPT_KEY) {
            self.question_prompt = question.trim().to_string();
        }
        self
    }

    pub fn render_prompt(&self, request: &QuestionRequest) -> String {
        render(&self.question_prompt, request)
    }
}

fn render(template: &str, request: &QuestionRequest) -> String {
    let profile = &request.user_profile;
    let previous = request
        .previous_response
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or("None");
    template
        .replace("{name}", &profile.name)
        .replace("{job_role}", &profile.job_role)
        .replace("{experience}", profile.experience.as_deref().unwrap_or("Not specified"))
        .replace("{skills}", &profile.skills_line())
        .replace("{previous_response}", previous)
        .replace("{question_number}", &request.question_number.to_string())
}

#[async_trait]
impl QuestionGenerator for InterviewerClient {
    async fn generate_question(
        &self,
        request: &QuestionRequest,
    ) -> Result<String, CollaboratorError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(CollaboratorError::NotConfigured { service: SERVICE })?;

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": self.system_prompt },
                { "role": "user", "content": self.render_prompt(request) }
            ],
            "max_tokens": 200,
            "temperature": 0.7
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(CollaboratorError::transport(SERVICE))?;

        let resp = ensure_success(SERVICE, response)
            .await?
            .json::<LlmResponse>()
            .await
            .map_err(|e| CollaboratorError::invalid_body(SERVICE, e))?;

        let question = resp
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| CollaboratorError::invalid_body(SERVICE, "no choices in response"))?;

        Ok(question)
    }
}
