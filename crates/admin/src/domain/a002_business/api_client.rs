use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::a002_business::aggregate::{Business, BusinessId};
use contracts::usecases::u001_category_assignment::AssignCategoryRequest;

use crate::shared::api::client::segment;
use crate::shared::api::{ApiClient, ApiError};

/// HTTP-клиент админских эндпоинтов бизнеса (`/admin/business/...`)
#[derive(Clone)]
pub struct BusinessApiClient {
    api: ApiClient,
}

impl BusinessApiClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn base(id: &BusinessId) -> String {
        format!("/admin/business/{}", segment(id.value()))
    }

    /// Карточка бизнеса вместе с назначенными категориями
    pub async fn fetch_by_id(&self, id: &BusinessId) -> Result<Business, ApiError> {
        self.api.get_json(&Self::base(id)).await
    }

    /// Рекомендованные сервером категории
    pub async fn fetch_recommendations(&self, id: &BusinessId) -> Result<Vec<Category>, ApiError> {
        self.api
            .get_json(&format!("{}/categories/recommendations", Self::base(id)))
            .await
    }

    /// Свободные названия категорий по описанию бизнеса (описание сервер берёт сам)
    pub async fn fetch_suggestions(&self, id: &BusinessId) -> Result<Vec<String>, ApiError> {
        self.api
            .get_json(&format!("{}/categories/suggestions", Self::base(id)))
            .await
    }

    pub async fn add_category(
        &self,
        id: &BusinessId,
        category_id: &CategoryId,
    ) -> Result<(), ApiError> {
        let path = format!(
            "{}/category/{}/add",
            Self::base(id),
            segment(category_id.value())
        );
        let body = AssignCategoryRequest {
            id: category_id.clone(),
        };
        self.api.post_no_content(&path, &body).await
    }

    pub async fn remove_category(
        &self,
        id: &BusinessId,
        category_id: &CategoryId,
    ) -> Result<(), ApiError> {
        let path = format!(
            "{}/category/{}/remove",
            Self::base(id),
            segment(category_id.value())
        );
        self.api.post_empty(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> BusinessApiClient {
        BusinessApiClient::new(ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/business/b1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "b1",
                "name": "Acme",
                "description": "Pipes",
                "categories": [{ "id": "1", "name": "Plumbing" }]
            })))
            .mount(&server)
            .await;

        let business = client(&server)
            .fetch_by_id(&BusinessId::new("b1"))
            .await
            .unwrap();
        assert_eq!(business.name, "Acme");
        assert_eq!(business.categories, vec![Category::new("1", "Plumbing")]);
    }

    #[tokio::test]
    async fn test_recommendations_may_be_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/business/b1/categories/recommendations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let recommended = client(&server)
            .fetch_recommendations(&BusinessId::new("b1"))
            .await
            .unwrap();
        assert!(recommended.is_empty());
    }

    #[tokio::test]
    async fn test_suggestions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/business/b1/categories/suggestions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!(["Drains", "Boilers"])),
            )
            .mount(&server)
            .await;

        let names = client(&server)
            .fetch_suggestions(&BusinessId::new("b1"))
            .await
            .unwrap();
        assert_eq!(names, vec!["Drains".to_string(), "Boilers".to_string()]);
    }

    #[tokio::test]
    async fn test_add_category_posts_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/business/b1/category/42/add"))
            .and(body_json(serde_json::json!({ "id": "42" })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .add_category(&BusinessId::new("b1"), &CategoryId::new("42"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_category_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/business/b1/category/42/remove"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server)
            .remove_category(&BusinessId::new("b1"), &CategoryId::new("42"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
