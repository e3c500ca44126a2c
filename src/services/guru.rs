use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't get an answer at this time.";
const PREAMBLE: &str = "You are an IPL expert. Answer the following question about IPL: ";

// ── generateContent wire types ───────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

// ── GuruClient ───────────────────────────────────────────────────────────────

/// Relay to the generative-language service. Runs server side only so the
/// key never reaches a device.
#[derive(Debug, Clone)]
pub struct GuruClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl GuruClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            api_key,
        }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Answer text, or [`FALLBACK_ANSWER`] on any failure.
    pub async fn ask(&self, question: &str) -> String {
        match self.try_ask(question).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::error!("Q&A request failed: {}", e);
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    pub async fn try_ask(&self, question: &str) -> Result<String, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::validation("question", "must not be empty"));
        }
        let api_key = self.api_key.as_ref().ok_or_else(|| AppError::Network {
            status: None,
            message: "GEMINI_API_KEY not set".to_string(),
        })?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: format!("{}{}", PREAMBLE, question),
                }],
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Network {
                status: Some(status.as_u16()),
                message: text,
            });
        }

        let data: GenerateResponse = response.json().await?;
        data.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::Network {
                status: Some(status.as_u16()),
                message: "response had no candidate text".to_string(),
            })
    }
}
