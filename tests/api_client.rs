use contactnova_search::api::{HttpSearchApi, SearchApi, SearchParams};
use contactnova_search::model::{ArticleId, EmbeddingType};
use serde_json::json;

mod util;
use util::{MockBackend, Route, sample_article, sample_results};

fn params(query: &str) -> SearchParams {
    SearchParams {
        query: query.into(),
        category: Some("Cuentas".into()),
        embedding_type: EmbeddingType::OpenaiLarge,
        use_validation: false,
        limit: None,
    }
}

#[tokio::test]
async fn search_decodes_results_in_backend_order() {
    let backend = MockBackend::start(vec![Route::ok("/search", sample_results())]);
    let api = HttpSearchApi::new(backend.base_url()).unwrap();

    let results = api.search(params("clave")).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, ArticleId::Int(42));
    assert_eq!(results[0].group, "Cuentas");
    assert_eq!(results[1].id, ArticleId::Int(43));
    assert_eq!(
        backend.requests(),
        vec!["/search?query=clave&category=Cuentas&embedding_type=openai-large"]
    );
}

#[tokio::test]
async fn non_success_status_is_network_error() {
    let backend = MockBackend::start(vec![Route::status("/search-with-ai-validation", 503)]);
    let api = HttpSearchApi::new(backend.base_url()).unwrap();

    let mut p = params("clave");
    p.use_validation = true;
    let err = api.search(p).await.unwrap_err();
    assert_eq!(err.endpoint, "/search-with-ai-validation");
    assert!(err.message.contains("503"), "{err}");
}

#[tokio::test]
async fn undecodable_body_is_network_error() {
    let backend = MockBackend::start(vec![Route::ok("/categories", json!({"error": "nope"}))]);
    let api = HttpSearchApi::new(backend.base_url()).unwrap();

    let err = api.list_categories().await.unwrap_err();
    assert_eq!(err.endpoint, "/categories");
    assert!(err.message.contains("invalid response body"), "{err}");
}

#[tokio::test]
async fn article_fetch_carries_embedding_type() {
    let backend = MockBackend::start(vec![Route::ok("/article/42", sample_article())]);
    let api = HttpSearchApi::new(format!("{}/", backend.base_url())).unwrap();

    let article = api
        .get_article(ArticleId::Int(42), EmbeddingType::Fasttext)
        .await
        .unwrap();
    assert_eq!(article.topic, "Acceso");
    assert!(article.answer.starts_with("<p>Abra"));
    assert_eq!(backend.requests(), vec!["/article/42?embedding_type=fasttext"]);
}
