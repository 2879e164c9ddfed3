//! OpenAI embedding provider implementation

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::embedding::{
    Embedding, EmbeddingInput, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage,
};
use crate::domain::DomainError;
use crate::infrastructure::http_client::HttpClientTrait;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI-compatible `/v1/embeddings` provider
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    /// Point the provider at another OpenAI-compatible endpoint
    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn build_request(request: &EmbeddingRequest) -> serde_json::Value {
        let input = match request.input() {
            EmbeddingInput::Single(text) => serde_json::json!(text),
            EmbeddingInput::Batch(texts) => serde_json::json!(texts),
        };

        let mut body = serde_json::json!({
            "model": request.model(),
            "input": input,
        });

        if let Some(dimensions) = request.dimensions() {
            body["dimensions"] = serde_json::json!(dimensions);
        }

        body
    }

    fn parse_response(
        json: serde_json::Value,
        expected: usize,
    ) -> Result<EmbeddingResponse, DomainError> {
        let response: OpenAiEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse embedding response: {}", e))
        })?;

        if response.data.len() != expected {
            return Err(DomainError::provider(
                "openai",
                format!(
                    "Expected {} embeddings, received {}",
                    expected,
                    response.data.len()
                ),
            ));
        }

        let embeddings = response
            .data
            .into_iter()
            .map(|data| Embedding::new(data.index, data.embedding))
            .collect();
        let usage = response
            .usage
            .map(|u| EmbeddingUsage::new(u.prompt_tokens, u.total_tokens))
            .unwrap_or_default();

        Ok(EmbeddingResponse::new(response.model, embeddings, usage))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        if request.input().is_empty() {
            return Err(DomainError::validation("Embedding request has no input"));
        }

        let headers = vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ];
        let body = Self::build_request(&request);

        let json = self
            .client
            .post_json(&self.embeddings_url(), headers, &body)
            .await?;

        Self::parse_response(json, request.input().len())
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    model: String,
    data: Vec<OpenAiEmbeddingData>,
    #[serde(default)]
    usage: Option<OpenAiEmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::infrastructure::http_client::{mock::MockHttpClient, HttpClient};

    const TEST_URL: &str = "https://api.openai.com/v1/embeddings";

    fn create_mock_response(vectors: &[Vec<f32>]) -> serde_json::Value {
        let data: Vec<serde_json::Value> = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| json!({"object": "embedding", "index": i, "embedding": v}))
            .collect();

        json!({
            "object": "list",
            "model": "text-embedding-3-small",
            "data": data,
            "usage": {"prompt_tokens": 8, "total_tokens": 8}
        })
    }

    #[tokio::test]
    async fn test_embed_single_text() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, create_mock_response(&[vec![0.1, 0.2, 0.3]]));
        let provider = OpenAiEmbeddingProvider::new(client, "test-key");

        let response = provider
            .embed(EmbeddingRequest::single("text-embedding-3-small", "what is bail"))
            .await
            .unwrap();

        assert_eq!(response.model(), "text-embedding-3-small");
        assert_eq!(response.embeddings()[0].vector(), &[0.1, 0.2, 0.3]);
        assert_eq!(response.usage().prompt_tokens(), 8);

        let sent = provider.client.requests();
        assert_eq!(sent[0], json!({"model": "text-embedding-3-small", "input": "what is bail"}));
    }

    #[tokio::test]
    async fn test_embed_batch_sends_array() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, create_mock_response(&[vec![1.0], vec![2.0]]));
        let provider = OpenAiEmbeddingProvider::new(client, "test-key");

        let response = provider
            .embed(EmbeddingRequest::batch("m", vec!["a".into(), "b".into()]))
            .await
            .unwrap();

        assert_eq!(response.into_vectors(), vec![vec![1.0], vec![2.0]]);
        assert_eq!(provider.client.requests()[0]["input"], json!(["a", "b"]));
    }

    #[tokio::test]
    async fn test_embed_count_mismatch() {
        let client = MockHttpClient::new().with_response(TEST_URL, create_mock_response(&[vec![1.0]]));
        let provider = OpenAiEmbeddingProvider::new(client, "test-key");

        let result = provider
            .embed(EmbeddingRequest::batch("m", vec!["a".into(), "b".into()]))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_embed_empty_batch_is_rejected() {
        let provider = OpenAiEmbeddingProvider::new(MockHttpClient::new(), "test-key");

        let result = provider.embed(EmbeddingRequest::batch("m", vec![])).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
        assert!(provider.client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_embed_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "Rate limit exceeded");
        let provider = OpenAiEmbeddingProvider::new(client, "test-key");

        let result = provider.embed(EmbeddingRequest::single("m", "hello")).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_usage_defaults() {
        let body = json!({
            "model": "m",
            "data": [{"index": 0, "embedding": [0.5]}]
        });
        let client = MockHttpClient::new().with_response(TEST_URL, body);
        let provider = OpenAiEmbeddingProvider::new(client, "test-key");

        let response = provider.embed(EmbeddingRequest::single("m", "x")).await.unwrap();

        assert_eq!(response.usage().total_tokens(), 0);
    }

    #[tokio::test]
    async fn test_against_http_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("Authorization", "Bearer live-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(create_mock_response(&[vec![0.6, 0.8]])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let provider =
            OpenAiEmbeddingProvider::with_base_url(HttpClient::new(), "live-key", format!("{}/", server.uri()));
        let response = provider
            .embed(EmbeddingRequest::single("text-embedding-3-small", "tenant rights"))
            .await
            .unwrap();

        assert_eq!(response.first().map(|e| e.dimensions()), Some(2));
        assert_eq!(provider.provider_name(), "openai");
    }
}
