#![forbid(unsafe_code)]

//! Scoring backends.
//!
//! The visualization does not compute attention; it asks a [`Scorer`].
//! [`RemoteScorer`] delegates to the scoring service, [`UniformScorer`] is
//! the service's own reference placeholder (full self-attention on the
//! diagonal, a uniform half elsewhere) and keeps the app usable offline.

use crate::{ApiClient, ClientError};
use tokenlens_core::attention::AttentionMatrix;
use tokenlens_core::token::token_count;

/// Produces an attention matrix for a text.
pub trait Scorer {
    /// Score a text. The matrix side length equals the text's token count.
    fn score(&self, text: &str) -> Result<AttentionMatrix, ClientError>;
}

/// Scores via the remote service.
#[derive(Debug, Clone)]
pub struct RemoteScorer {
    client: ApiClient,
}

impl RemoteScorer {
    /// Wrap an [`ApiClient`].
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl Scorer for RemoteScorer {
    fn score(&self, text: &str) -> Result<AttentionMatrix, ClientError> {
        self.client.score(text)
    }
}

/// Offline reference scorer: 1.0 on the diagonal, 0.5 everywhere else.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformScorer;

impl Scorer for UniformScorer {
    fn score(&self, text: &str) -> Result<AttentionMatrix, ClientError> {
        let n = token_count(text);
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.5 }).collect())
            .collect();
        Ok(AttentionMatrix::new(rows)?)
    }
}
