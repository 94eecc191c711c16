use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::a003_service::aggregate::{CategorySuggestionsRequest, Service, ServiceId};
use contracts::usecases::u001_category_assignment::AssignCategoryRequest;

use crate::shared::api::client::segment;
use crate::shared::api::{ApiClient, ApiError};

/// HTTP-клиент админских эндпоинтов услуг (`/admin/service/...`)
#[derive(Clone)]
pub struct ServiceApiClient {
    api: ApiClient,
}

impl ServiceApiClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn base(id: &ServiceId) -> String {
        format!("/admin/service/{}", segment(id.value()))
    }

    pub async fn fetch_by_id(&self, id: &ServiceId) -> Result<Service, ApiError> {
        self.api.get_json(&Self::base(id)).await
    }

    /// Подходящие категории для услуги
    pub async fn fetch_matching(&self, id: &ServiceId) -> Result<Vec<Category>, ApiError> {
        self.api
            .get_json(&format!("{}/categories/matching", Self::base(id)))
            .await
    }

    /// Подсказки названий категорий по произвольному тексту
    pub async fn fetch_suggestions(&self, query: &str) -> Result<Vec<String>, ApiError> {
        let body = CategorySuggestionsRequest {
            query: query.to_string(),
        };
        self.api
            .post_json("/admin/service/categories/suggestions", &body)
            .await
    }

    pub async fn add_category(
        &self,
        id: &ServiceId,
        category_id: &CategoryId,
    ) -> Result<(), ApiError> {
        let path = format!("{}/categories/add", Self::base(id));
        let body = AssignCategoryRequest {
            id: category_id.clone(),
        };
        self.api.post_no_content(&path, &body).await
    }

    pub async fn remove_category(
        &self,
        id: &ServiceId,
        category_id: &CategoryId,
    ) -> Result<(), ApiError> {
        let path = format!(
            "{}/categories/{}/remove",
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

    fn client(server: &MockServer) -> ServiceApiClient {
        ServiceApiClient::new(ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn test_fetch_matching() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/service/s1/categories/matching"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "id": "3", "name": "Roofing" }])),
            )
            .mount(&server)
            .await;

        let matching = client(&server)
            .fetch_matching(&ServiceId::new("s1"))
            .await
            .unwrap();
        assert_eq!(matching, vec![Category::new("3", "Roofing")]);
    }

    #[tokio::test]
    async fn test_suggestions_post_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/service/categories/suggestions"))
            .and(body_json(serde_json::json!({ "query": "fix leaking roof" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["Roofing"])))
            .expect(1)
            .mount(&server)
            .await;

        let names = client(&server)
            .fetch_suggestions("fix leaking roof")
            .await
            .unwrap();
        assert_eq!(names, vec!["Roofing".to_string()]);
    }

    #[tokio::test]
    async fn test_add_and_remove_paths() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/service/s1/categories/add"))
            .and(body_json(serde_json::json!({ "id": "3" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/admin/service/s1/categories/3/remove"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let service = ServiceId::new("s1");
        let category = CategoryId::new("3");
        client.add_category(&service, &category).await.unwrap();
        client.remove_category(&service, &category).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/admin/service/s1/categories/add"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client(&server)
            .add_category(&ServiceId::new("s1"), &CategoryId::new("3"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
