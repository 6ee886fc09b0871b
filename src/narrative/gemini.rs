use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::NarrativeConfig;
use crate::data::observation::Observation;
use crate::error::NarrativeError;
use crate::narrative::prompt::build_prompt;
use crate::narrative::{fallback_message, NarrativeGenerator};
use crate::processing::statistics::StatisticsBundle;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The `error.message` of an API error body, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// Narrative generator backed by the Gemini `generateContent` REST API.
#[derive(Clone)]
pub struct GeminiNarrator {
    client: Client,
    config: Arc<NarrativeConfig>,
}

impl GeminiNarrator {
    pub fn new(config: NarrativeConfig) -> Result<Self, NarrativeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(format!("trendplot/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    pub async fn request_report(
        &self,
        series: &[Observation],
        stats: &StatisticsBundle,
    ) -> Result<String, NarrativeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(NarrativeError::MissingCredentials)?;

        let prompt = build_prompt(series, stats);
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
            },
        };

        tracing::info!(model = %self.config.model, points = series.len(), "requesting trend report");
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NarrativeError::Http {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.text().ok_or(NarrativeError::EmptyResponse)
    }
}

impl NarrativeGenerator for GeminiNarrator {
    fn generate(
        &self,
        series: Vec<Observation>,
        stats: StatisticsBundle,
    ) -> BoxFuture<'static, String> {
        let narrator = self.clone();
        async move {
            match narrator.request_report(&series, &stats).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Trend report unavailable: {e}");
                    fallback_message(&e).to_string()
                }
            }
        }
        .boxed()
    }
}
