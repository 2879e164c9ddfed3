//! Text embeddings: provider trait, request/response models and vector math

mod provider;
mod request;
mod response;

pub use provider::EmbeddingProvider;
#[cfg(test)]
pub use provider::mock::MockEmbeddingProvider;
pub use request::{EmbeddingInput, EmbeddingRequest};
pub use response::{cosine_similarity, Embedding, EmbeddingResponse, EmbeddingUsage};
