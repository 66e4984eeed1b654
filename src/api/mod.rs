//! HTTP contract of the search backend.
//!
//! The orchestrator talks to the backend through [`SearchApi`]; [`HttpSearchApi`]
//! is the reqwest implementation used by the binary.

pub mod client;

use std::future::Future;

use thiserror::Error;

use crate::model::{Article, ArticleId, Category, EmbeddingType, SearchResult};

pub use client::HttpSearchApi;

/// Every failure talking to the backend: transport errors, non-2xx statuses
/// and undecodable bodies alike.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("network error on {endpoint}: {message}")]
pub struct NetworkError {
    pub endpoint: String,
    pub message: String,
}

impl NetworkError {
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, NetworkError>;

/// Backend path for a search, chosen by the validation toggle.
pub fn search_path(use_validation: bool) -> &'static str {
    if use_validation {
        "/search-with-ai-validation"
    } else {
        "/search"
    }
}

/// Parameters of one search call, captured when the search is submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub category: Option<Category>,
    pub embedding_type: EmbeddingType,
    pub use_validation: bool,
    pub limit: Option<u32>,
}

impl SearchParams {
    /// Query-string pairs in wire order. `category` is always present and
    /// empty when no category is selected.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("query", self.query.clone()),
            ("category", self.category.clone().unwrap_or_default()),
            ("embedding_type", self.embedding_type.as_str().to_string()),
        ];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// The four backend operations. Each call is a single attempt with no retry,
/// timeout or caching.
pub trait SearchApi: Send + Sync + 'static {
    fn list_categories(&self) -> impl Future<Output = ApiResult<Vec<Category>>> + Send;

    fn search(&self, params: SearchParams)
    -> impl Future<Output = ApiResult<Vec<SearchResult>>> + Send;

    fn get_article(
        &self,
        id: ArticleId,
        embedding_type: EmbeddingType,
    ) -> impl Future<Output = ApiResult<Article>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(use_validation: bool) -> SearchParams {
        SearchParams {
            query: "reset password".into(),
            category: None,
            embedding_type: EmbeddingType::Fasttext,
            use_validation,
            limit: None,
        }
    }

    #[test]
    fn test_search_path_follows_validation_toggle() {
        assert_eq!(search_path(false), "/search");
        assert_eq!(search_path(true), "/search-with-ai-validation");
    }

    #[test]
    fn test_query_pairs_always_carry_category() {
        let pairs = params(false).query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("query", "reset password".to_string()),
                ("category", String::new()),
                ("embedding_type", "fasttext".to_string()),
            ]
        );
    }

    #[test]
    fn test_validation_toggle_does_not_change_query_pairs() {
        assert_eq!(params(false).query_pairs(), params(true).query_pairs());
    }

    #[test]
    fn test_limit_is_appended_only_when_set() {
        let mut p = params(false);
        p.limit = Some(10);
        let pairs = p.query_pairs();
        assert_eq!(pairs.last(), Some(&("limit", "10".to_string())));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn test_network_error_display() {
        let err = NetworkError::new("/categories", "connection refused");
        assert_eq!(
            err.to_string(),
            "network error on /categories: connection refused"
        );
    }
}
