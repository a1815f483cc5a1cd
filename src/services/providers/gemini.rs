/// Gemini API client
///
/// Implements both provider traits against the Generative Language API:
/// `models/{m}:embedContent` for embeddings and `models/{m}:generateContent`
/// for card text. One client instance is constructed at startup and shared.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::providers::{EmbeddingProvider, EmbeddingTask, TextGenerator},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Wire types for models/{m}:embedContent

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: Content,
    task_type: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

// Wire types for models/{m}:generateContent

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Clone)]
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    embedding_model: String,
    generation_model: String,
    dimensions: usize,
}

impl GeminiClient {
    /// Builds a client from configuration
    ///
    /// An absent or blank credential is a configuration error at construction
    /// time, not a per-request failure.
    pub fn new(config: &Config) -> AppResult<Self> {
        if config.google_api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "google_api_key is not set".to_string(),
            ));
        }

        let http_client = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            api_key: config.google_api_key.clone(),
            api_url: config.gemini_api_url.trim_end_matches('/').to_string(),
            embedding_model: config.embedding_model.clone(),
            generation_model: config.generation_model.clone(),
            dimensions: config.embedding_dimensions,
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.api_url, model, method, self.api_key
        )
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for GeminiClient {
    async fn embed(&self, text: &str, task: EmbeddingTask) -> AppResult<Vec<f32>> {
        let request = EmbedContentRequest {
            model: format!("models/{}", self.embedding_model),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
            task_type: task.as_task_type(),
        };

        // Timeouts and transport errors all collapse into the same typed
        // failure; retrieval cannot proceed without a vector either way.
        let response = self
            .http_client
            .post(self.endpoint(&self.embedding_model, "embedContent"))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::EmbeddingUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::EmbeddingUnavailable(format!(
                "embedding API returned {status}: {body}"
            )));
        }

        let parsed: EmbedContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::EmbeddingUnavailable(format!("malformed response: {e}")))?;

        let values = parsed.embedding.values;
        if values.len() != self.dimensions {
            return Err(AppError::EmbeddingUnavailable(format!(
                "backend returned {} dimensions, expected {}",
                values.len(),
                self.dimensions
            )));
        }

        tracing::debug!(
            task = task.as_task_type(),
            dimensions = values.len(),
            "embedding generated"
        );

        Ok(values)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(self.endpoint(&self.generation_model, "generateContent"))
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationFailed(format!(
                "generation API returned {status}: {body}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::GenerationFailed(format!("malformed response: {e}")))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                AppError::GenerationFailed("response contained no candidates".to_string())
            })?;

        tracing::debug!(output_len = text.len(), "generation completed");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/test".to_string(),
            google_api_key: "test_key".to_string(),
            gemini_api_url: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            generation_model: "gemini-1.5-flash".to_string(),
            embedding_dimensions: 768,
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        let mut config = test_config();
        config.google_api_key = "   ".to_string();

        let result = GeminiClient::new(&config);
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(&test_config()).unwrap();
        let url = client.endpoint("text-embedding-004", "embedContent");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/text-embedding-004:embedContent?key=test_key"
        );
    }

    #[test]
    fn test_embed_request_wire_shape() {
        let request = EmbedContentRequest {
            model: "models/text-embedding-004".to_string(),
            content: Content {
                parts: vec![Part {
                    text: "a cat video".to_string(),
                }],
            },
            task_type: EmbeddingTask::Document.as_task_type(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "models/text-embedding-004");
        assert_eq!(value["taskType"], "RETRIEVAL_DOCUMENT");
        assert_eq!(value["content"]["parts"][0]["text"], "a cat video");
    }

    #[test]
    fn test_embed_response_parses() {
        let json = r#"{"embedding": {"values": [0.1, -0.2, 0.3]}}"#;
        let parsed: EmbedContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.embedding.values, vec![0.1, -0.2, 0.3]);
    }

    #[test]
    fn test_generate_response_parses() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"content_cards\": []}"}]}}
            ]
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.candidates.len(), 1);
        assert_eq!(
            parsed.candidates[0].content.parts[0].text,
            "{\"content_cards\": []}"
        );
    }

    #[test]
    fn test_generate_response_without_candidates_parses_empty() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
