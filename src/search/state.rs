//! Search view state and the transitions user actions and fetch completions
//! apply to it.
//!
//! Transitions are synchronous: an action returns the request to issue (if
//! any) stamped with a sequence number, and the matching `finish_*` method
//! applies the outcome once the request resolves. Whoever owns the state
//! decides how requests are executed.

use serde::{Deserialize, Serialize};

use super::query::{SearchFilters, is_blank};
use crate::api::{ApiResult, SearchParams};
use crate::model::{Article, ArticleId, Category, EmbeddingType, SearchResult};

/// How completions of overlapping requests are reconciled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Every completion is applied in arrival order; a slow, older search can
    /// overwrite a newer one.
    #[default]
    LastCompleted,
    /// Only the most recently issued request of each kind is applied.
    LastIssued,
}

impl std::fmt::Display for ResponseOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastCompleted => write!(f, "last-completed"),
            Self::LastIssued => write!(f, "last-issued"),
        }
    }
}

/// A search to issue.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub seq: u64,
    pub params: SearchParams,
}

/// An article fetch to issue.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRequest {
    pub seq: u64,
    pub id: ArticleId,
    pub embedding_type: EmbeddingType,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    filters: SearchFilters,
    categories: Vec<Category>,
    /// Index of the selected category in `categories`, set by cycling.
    category_cursor: Option<usize>,
    results: Vec<SearchResult>,
    selected_article: Option<Article>,
    loading: bool,
    ordering: ResponseOrdering,
    limit: Option<u32>,
    categories_requested: bool,
    next_seq: u64,
    latest_search: u64,
    latest_article: u64,
}

impl SearchState {
    pub fn new(filters: SearchFilters, ordering: ResponseOrdering, limit: Option<u32>) -> Self {
        Self {
            filters,
            ordering,
            limit,
            ..Default::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.selected_article.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    /// Whether `result` is the row of the currently displayed article.
    pub fn is_selected(&self, result: &SearchResult) -> bool {
        self.selected_article
            .as_ref()
            .is_some_and(|a| a.id == result.id)
    }

    // ── filter and query edits ────────────────────────────────────────────

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filters.category = category;
        self.category_cursor = None;
    }

    /// Step through "all groups" followed by each loaded category, by
    /// position, so repeated names are each visited once.
    pub fn cycle_category(&mut self) {
        let next_idx = match &self.filters.category {
            None => 0,
            Some(current) => match self.category_cursor {
                Some(idx) if self.categories.get(idx) == Some(current) => idx + 1,
                _ => self
                    .categories
                    .iter()
                    .position(|c| c == current)
                    .map_or(self.categories.len(), |idx| idx + 1),
            },
        };
        self.category_cursor = (next_idx < self.categories.len()).then_some(next_idx);
        self.filters.category = self
            .category_cursor
            .and_then(|idx| self.categories.get(idx))
            .cloned();
    }

    pub fn set_embedding_type(&mut self, embedding_type: EmbeddingType) {
        self.filters.embedding_type = embedding_type;
    }

    pub fn cycle_embedding_type(&mut self) {
        self.filters.embedding_type = self.filters.embedding_type.next();
    }

    pub fn set_validation(&mut self, enabled: bool) {
        self.filters.use_validation = enabled;
    }

    pub fn toggle_validation(&mut self) {
        self.filters.use_validation = !self.filters.use_validation;
    }

    // ── categories ────────────────────────────────────────────────────────

    /// Returns `true` exactly once: the first call claims the category load.
    pub fn begin_category_load(&mut self) -> bool {
        !std::mem::replace(&mut self.categories_requested, true)
    }

    /// Store fetched categories verbatim; a failure leaves the list empty.
    pub fn finish_category_load(&mut self, outcome: ApiResult<Vec<Category>>) {
        self.categories = match outcome {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "categories loaded");
                categories
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load categories");
                Vec::new()
            }
        };
    }

    // ── search ────────────────────────────────────────────────────────────

    /// Start a search with the current query and filters.
    ///
    /// A blank query clears results and selection and returns `None`.
    pub fn submit_search(&mut self) -> Option<SearchRequest> {
        let seq = self.bump_seq();
        if is_blank(&self.query) {
            self.results.clear();
            self.selected_article = None;
            if self.ordering == ResponseOrdering::LastIssued {
                // Supersedes whatever is still in flight.
                self.latest_search = seq;
                self.loading = false;
            }
            return None;
        }

        self.latest_search = seq;
        self.loading = true;
        Some(SearchRequest {
            seq,
            params: self.filters.to_params(&self.query, self.limit),
        })
    }

    /// Apply a search completion. Returns `false` if it was discarded as stale.
    pub fn finish_search(&mut self, seq: u64, outcome: ApiResult<Vec<SearchResult>>) -> bool {
        if self.ordering == ResponseOrdering::LastIssued && seq != self.latest_search {
            tracing::debug!(seq, latest = self.latest_search, "discarding stale search");
            return false;
        }

        self.results = match outcome {
            Ok(results) => {
                tracing::debug!(seq, count = results.len(), "search completed");
                results
            }
            Err(err) => {
                tracing::warn!(seq, error = %err, "search failed");
                Vec::new()
            }
        };
        self.selected_article = None;
        self.loading = false;
        true
    }

    // ── article selection ─────────────────────────────────────────────────

    /// Request the article for a result row with the current embedding type.
    pub fn select_article(&mut self, id: ArticleId) -> ArticleRequest {
        let seq = self.bump_seq();
        self.latest_article = seq;
        ArticleRequest {
            seq,
            id,
            embedding_type: self.filters.embedding_type,
        }
    }

    /// Apply an article completion. A failure keeps the previous selection.
    pub fn finish_article(&mut self, seq: u64, outcome: ApiResult<Article>) -> bool {
        if self.ordering == ResponseOrdering::LastIssued
            && (seq != self.latest_article || seq < self.latest_search)
        {
            tracing::debug!(seq, "discarding stale article");
            return false;
        }

        match outcome {
            Ok(article) => {
                tracing::debug!(seq, id = %article.id, "article loaded");
                self.selected_article = Some(article);
                true
            }
            Err(err) => {
                tracing::warn!(seq, error = %err, "failed to load article");
                false
            }
        }
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}
