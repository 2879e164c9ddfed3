//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers (OpenAI-compatible endpoints, local models, etc.)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::domain::embedding::{Embedding, EmbeddingUsage};

    /// Test provider returning deterministic vectors.
    ///
    /// Texts registered with `with_vector` get that exact vector; anything else
    /// gets a vector derived from the text bytes.
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        dimensions: usize,
        vectors: HashMap<String, Vec<f32>>,
        error: Option<String>,
        delay: Option<Duration>,
        calls: AtomicUsize,
    }

    impl MockEmbeddingProvider {
        pub fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                vectors: HashMap::new(),
                error: None,
                delay: None,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
            self.vectors.insert(text.into(), vector);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Number of `embed` calls received so far
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn vector_for(&self, text: &str) -> Vec<f32> {
            if let Some(vector) = self.vectors.get(text) {
                return vector.clone();
            }

            let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
            (0..self.dimensions)
                .map(|i| ((hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0) - 0.5)
                .collect()
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(ref error) = self.error {
                return Err(DomainError::provider("mock", error));
            }

            let texts = request.texts();
            let embeddings = texts
                .iter()
                .enumerate()
                .map(|(idx, text)| Embedding::new(idx, self.vector_for(text)))
                .collect();
            let tokens = texts.iter().map(|t| t.len() / 4).sum::<usize>() as u32;

            Ok(EmbeddingResponse::new(
                request.model().to_string(),
                embeddings,
                EmbeddingUsage::new(tokens, tokens),
            ))
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_provider_batch() {
            let provider = MockEmbeddingProvider::new(16);
            let request = EmbeddingRequest::batch("mock", vec!["a".into(), "b".into()]);

            let response = provider.embed(request).await.unwrap();

            assert_eq!(response.embeddings().len(), 2);
            assert_eq!(response.embeddings()[1].dimensions(), 16);
            assert_eq!(provider.calls(), 1);
        }

        #[tokio::test]
        async fn test_mock_provider_fixed_vector() {
            let provider = MockEmbeddingProvider::new(2).with_vector("bail", vec![1.0, 0.0]);

            let response = provider
                .embed(EmbeddingRequest::single("mock", "bail"))
                .await
                .unwrap();

            assert_eq!(response.first().unwrap().vector(), &[1.0, 0.0]);
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let provider = MockEmbeddingProvider::new(8).with_error("API error");

            let result = provider.embed(EmbeddingRequest::single("mock", "q")).await;

            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_mock_provider_deterministic() {
            let provider = MockEmbeddingProvider::new(32);

            let first = provider
                .embed(EmbeddingRequest::single("mock", "land"))
                .await
                .unwrap();
            let second = provider
                .embed(EmbeddingRequest::single("mock", "land"))
                .await
                .unwrap();

            assert_eq!(first.first().unwrap().vector(), second.first().unwrap().vector());
        }
    }
}
