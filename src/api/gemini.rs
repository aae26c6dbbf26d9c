use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::coach::TipsModel;
use crate::error::ModelError;

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
    #[serde(default)]
    safety_ratings: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
    safety_ratings: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client; `timeout` bounds each generate call
    pub fn new(base_url: &str, model: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Gemini HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    /// Send a single-turn prompt and return the first candidate's text
    pub async fn generate_content(&self, prompt: &str) -> Result<String, ModelError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        info!("Sending prompt to {} ({} chars)", self.model, prompt.len());

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        debug!("Gemini responded with {}", status);

        classify_response(status.as_u16(), &text)
    }

    fn transport_error(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout(self.timeout.as_secs())
        } else {
            warn!("Gemini request failed: {}", err);
            ModelError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl TipsModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        self.generate_content(prompt).await
    }
}

/// Turn a `generateContent` status and body into tips text or a [`ModelError`]
pub fn classify_response(status: u16, body: &str) -> Result<String, ModelError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.error)
            .and_then(|error| error.message)
            .filter(|message| !message.trim().is_empty());

        warn!("Gemini returned status {}: {}", status, body);
        return Err(ModelError::Status { status, message });
    }

    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        warn!("Failed to parse Gemini response: {}", e);
        ModelError::Malformed
    })?;

    let first = response.candidates.first();

    if let Some(text) = first
        .and_then(|c| c.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.clone())
    {
        return Ok(text);
    }

    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Err(ModelError::Blocked {
                reason: reason.clone(),
                details: feedback
                    .safety_ratings
                    .as_ref()
                    .map(|ratings| Value::Array(ratings.clone()).to_string()),
            });
        }
    }

    if let Some(candidate) = first {
        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ModelError::Blocked {
                reason: "SAFETY".to_string(),
                details: (!candidate.safety_ratings.is_empty())
                    .then(|| Value::Array(candidate.safety_ratings.clone()).to_string()),
            });
        }
    }

    warn!("Unexpected response structure from Gemini: {}", body);
    Err(ModelError::Malformed)
}
