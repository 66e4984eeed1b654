use serde::{Deserialize, Serialize};

use crate::api::SearchParams;
use crate::model::{Category, EmbeddingType};

/// Filters applied to the next search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// `None` means all groups.
    pub category: Option<Category>,
    pub embedding_type: EmbeddingType,
    pub use_validation: bool,
}

impl SearchFilters {
    /// Snapshot the filters into request parameters for `query`.
    pub fn to_params(&self, query: &str, limit: Option<u32>) -> SearchParams {
        SearchParams {
            query: query.to_string(),
            category: self.category.clone().filter(|c| !c.is_empty()),
            embedding_type: self.embedding_type,
            use_validation: self.use_validation,
            limit,
        }
    }
}

/// `true` when the query has nothing to search for.
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_queries() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn test_to_params_keeps_untrimmed_query_and_drops_empty_category() {
        let filters = SearchFilters {
            category: Some(String::new()),
            embedding_type: EmbeddingType::Fasttext,
            use_validation: true,
        };
        let params = filters.to_params(" reset ", Some(3));
        assert_eq!(params.query, " reset ");
        assert_eq!(params.category, None);
        assert_eq!(params.embedding_type, EmbeddingType::Fasttext);
        assert!(params.use_validation);
        assert_eq!(params.limit, Some(3));
    }
}
