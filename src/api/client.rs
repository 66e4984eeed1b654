use reqwest::Client;
use serde::de::DeserializeOwned;

use super::{ApiResult, NetworkError, SearchApi, SearchParams, search_path};
use crate::model::{Article, ArticleId, Category, EmbeddingType, SearchResult};

/// reqwest-backed client for the search backend.
#[derive(Clone)]
pub struct HttpSearchApi {
    base_url: String,
    client: Client,
}

impl HttpSearchApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, NetworkError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .build()
            .map_err(|e| NetworkError::new(&base_url, e.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Path of the article endpoint; the id is percent-encoded as one segment.
    pub fn article_path(id: &ArticleId) -> String {
        format!("/article/{}", urlencoding::encode(&id.as_text()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(url = %url, params = ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| NetworkError::new(path, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::new(path, format!("HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| NetworkError::new(path, format!("invalid response body: {e}")))
    }
}

impl SearchApi for HttpSearchApi {
    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.get_json("/categories", &[]).await
    }

    async fn search(&self, params: SearchParams) -> ApiResult<Vec<SearchResult>> {
        let path = search_path(params.use_validation);
        self.get_json(path, &params.query_pairs()).await
    }

    async fn get_article(&self, id: ArticleId, embedding_type: EmbeddingType) -> ApiResult<Article> {
        let path = Self::article_path(&id);
        self.get_json(
            &path,
            &[("embedding_type", embedding_type.as_str().to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpSearchApi::new("http://localhost:8080/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080");
        assert_eq!(api.url("/categories"), "http://localhost:8080/categories");
    }

    #[test]
    fn test_article_path_encodes_id() {
        assert_eq!(HttpSearchApi::article_path(&ArticleId::Int(42)), "/article/42");
        assert_eq!(
            HttpSearchApi::article_path(&ArticleId::Text("a b/c".into())),
            "/article/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let api = HttpSearchApi::new(format!("http://127.0.0.1:{port}")).unwrap();
        let err = api.list_categories().await.unwrap_err();
        assert_eq!(err.endpoint, "/categories");
    }
}
