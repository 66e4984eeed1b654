//! Drives [`SearchState`] against a [`SearchApi`].
//!
//! Requests run as tokio tasks and report back over a channel; completions are
//! applied only by the owner of the orchestrator, so the state is never
//! touched from more than one place.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::state::{ArticleRequest, SearchRequest, SearchState};
use crate::api::{ApiResult, SearchApi};
use crate::model::{Article, ArticleId, Category, SearchResult};

/// Outcome of a request, tagged with the sequence number it was issued with.
#[derive(Debug)]
pub enum Completion {
    Categories(ApiResult<Vec<Category>>),
    Search {
        seq: u64,
        outcome: ApiResult<Vec<SearchResult>>,
    },
    Article {
        seq: u64,
        outcome: ApiResult<Article>,
    },
}

pub struct Orchestrator<A: SearchApi> {
    api: Arc<A>,
    state: SearchState,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<A: SearchApi> Orchestrator<A> {
    pub fn new(api: A, state: SearchState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            api: Arc::new(api),
            state,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Mutable access for query and filter edits.
    pub fn state_mut(&mut self) -> &mut SearchState {
        &mut self.state
    }

    /// Number of requests issued whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Fetch categories; only the first call issues a request.
    pub fn load_categories(&mut self) {
        if !self.state.begin_category_load() {
            return;
        }
        let api = Arc::clone(&self.api);
        self.spawn(async move { Completion::Categories(api.list_categories().await) });
    }

    /// Submit the current query. Returns the sequence number of the issued
    /// request, or `None` when the query was blank and no request was made.
    pub fn submit_search(&mut self) -> Option<u64> {
        let SearchRequest { seq, params } = self.state.submit_search()?;
        tracing::info!(
            seq,
            query = %params.query,
            category = params.category.as_deref().unwrap_or(""),
            embedding_type = %params.embedding_type,
            validation = params.use_validation,
            "submitting search"
        );
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            Completion::Search {
                seq,
                outcome: api.search(params).await,
            }
        });
        Some(seq)
    }

    /// Fetch the article behind a result row.
    pub fn select_article(&mut self, id: ArticleId) -> u64 {
        let ArticleRequest {
            seq,
            id,
            embedding_type,
        } = self.state.select_article(id);
        tracing::debug!(seq, id = %id, embedding_type = %embedding_type, "selecting article");
        let api = Arc::clone(&self.api);
        self.spawn(async move {
            Completion::Article {
                seq,
                outcome: api.get_article(id, embedding_type).await,
            }
        });
        seq
    }

    /// Apply every completion that has already arrived without waiting.
    /// Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion and apply it. Returns `false` when nothing
    /// is in flight.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Wait until every issued request has been applied.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // The receiver only goes away with the orchestrator itself.
            let _ = tx.send(fut.await);
        });
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Categories(outcome) => self.state.finish_category_load(outcome),
            Completion::Search { seq, outcome } => {
                self.state.finish_search(seq, outcome);
            }
            Completion::Article { seq, outcome } => {
                self.state.finish_article(seq, outcome);
            }
        }
    }
}
