use contracts::domain::a001_category::aggregate::{Category, CategoryId, CreateCategoryRequest};

use crate::shared::api::client::segment;
use crate::shared::api::{ApiClient, ApiError};

/// HTTP-клиент каталога категорий
#[derive(Clone)]
pub struct CategoryApiClient {
    api: ApiClient,
}

impl CategoryApiClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Полный список категорий: GET /categories
    pub async fn fetch_all(&self) -> Result<Vec<Category>, ApiError> {
        let categories: Vec<Category> = self.api.get_json("/categories").await?;
        tracing::debug!("Catalog: got {} categories", categories.len());
        Ok(categories)
    }

    /// Создать категорию: POST /categories/new
    ///
    /// Пустое имя отклоняется до отправки запроса. Уникальность имени
    /// проверяет только сервер (409 -> `ApiError::Conflict`).
    pub async fn create(&self, name: &str) -> Result<Category, ApiError> {
        let request = CreateCategoryRequest::new(name).map_err(ApiError::Validation)?;
        let category: Category = self.api.post_json("/categories/new", &request).await?;
        tracing::info!("Catalog: created category '{}' ({})", category.name, category.id);
        Ok(category)
    }

    /// Удалить категорию: DELETE /categories/{id}
    pub async fn delete(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.api
            .delete(&format!("/categories/{}", segment(id.value())))
            .await?;
        tracing::info!("Catalog: deleted category {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client(server: &MockServer) -> CategoryApiClient {
        CategoryApiClient::new(ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": "1", "name": "Plumbing" },
                { "id": "2", "name": "Cleaning", "createdAt": "2025-01-01T00:00:00Z" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let categories = client(&server).await.fetch_all().await.unwrap();
        assert_eq!(
            categories,
            vec![Category::new("1", "Plumbing"), Category::new("2", "Cleaning")]
        );
    }

    #[tokio::test]
    async fn test_create_posts_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/categories/new"))
            .and(body_json(serde_json::json!({ "name": "Plumbing" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "id": "42", "name": "Plumbing" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let category = client(&server).await.create(" Plumbing ").await.unwrap();
        assert_eq!(category, Category::new("42", "Plumbing"));
    }

    #[tokio::test]
    async fn test_create_blank_name_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server).await.create("   ").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/categories/new"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let err = client(&server).await.create("Plumbing").await.unwrap_err();
        assert_eq!(err.kind(), crate::shared::api::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/categories/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .await
            .delete(&CategoryId::new("7"))
            .await
            .unwrap();
    }
}
