use std::future::Future;
use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::error::{NetmapError, Result};
use crate::render::truncate;
use crate::settings::InsightSettings;

/// Maximum length of an API error body kept in [`NetmapError::Api`].
const MAX_ERROR_BODY_LEN: usize = 200;

/// A service that turns a prompt into free text.
pub trait TextGenerator: Send + Sync + 'static {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

/// `generateContent` client for the Generative Language API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
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

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn from_settings(settings: &InsightSettings) -> Result<Self> {
        let api_key = settings.resolve_api_key().ok_or(NetmapError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(GeminiClient {
            http,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let start = Instant::now();
        info!(model = %self.model, prompt_chars = prompt.len(), "Requesting insights");
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(NetmapError::Api {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY_LEN),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = first_candidate_text(&parsed);
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            chars = text.len(),
            "Insights received"
        );
        Ok(text)
    }
}

/// Concatenated text parts of the first candidate; empty if there is none.
fn first_candidate_text(response: &GenerateResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default()
}
