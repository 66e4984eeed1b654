//! Wire types shared by the API client, the orchestrator and the presenter.
//!
//! Field names on the wire follow the backend's Spanish payload keys
//! (`pregunta`, `grupo`, `tema`, `respuesta`); the Rust side uses English names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque category label ("grupo").
pub type Category = String;

/// Article identifier.
///
/// One backend returns integer ids, the other stringified ids; both are
/// accepted and compared by their textual form.
#[derive(Debug, Clone, Serialize, Deserialize, Eq)]
#[serde(untagged)]
pub enum ArticleId {
    Int(i64),
    Text(String),
}

impl ArticleId {
    pub fn as_text(&self) -> String {
        match self {
            ArticleId::Int(n) => n.to_string(),
            ArticleId::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for ArticleId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArticleId::Int(a), ArticleId::Int(b)) => a == b,
            (ArticleId::Text(a), ArticleId::Text(b)) => a == b,
            _ => self.as_text() == other.as_text(),
        }
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArticleId::Int(n) => write!(f, "{n}"),
            ArticleId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ArticleId {
    fn from(n: i64) -> Self {
        ArticleId::Int(n)
    }
}

/// Kept verbatim: string ids such as `007` must reach the backend unchanged.
impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        ArticleId::Text(s.to_string())
    }
}

/// Which vector representation the backend ranks with.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingType {
    #[default]
    OpenaiLarge,
    Fasttext,
}

impl EmbeddingType {
    /// Wire value of the `embedding_type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            EmbeddingType::OpenaiLarge => "openai-large",
            EmbeddingType::Fasttext => "fasttext",
        }
    }

    pub fn next(self) -> Self {
        match self {
            EmbeddingType::OpenaiLarge => EmbeddingType::Fasttext,
            EmbeddingType::Fasttext => EmbeddingType::OpenaiLarge,
        }
    }
}

impl fmt::Display for EmbeddingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbeddingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "openai-large" => Ok(EmbeddingType::OpenaiLarge),
            "fasttext" => Ok(EmbeddingType::Fasttext),
            other => Err(format!(
                "unknown embedding type '{other}' (expected openai-large or fasttext)"
            )),
        }
    }
}

/// One row of a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: ArticleId,
    #[serde(rename = "pregunta", default)]
    pub question: String,
    #[serde(rename = "grupo", default)]
    pub group: String,
    #[serde(rename = "tema", default)]
    pub topic: String,
    /// Similarity score; only the newer backend sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(rename = "respuesta", default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

/// Full article record fetched on selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    #[serde(rename = "pregunta", default)]
    pub question: String,
    #[serde(rename = "grupo", default)]
    pub group: String,
    #[serde(rename = "tema", default)]
    pub topic: String,
    /// Pre-rendered HTML body.
    #[serde(rename = "respuesta", default)]
    pub answer: String,
}
