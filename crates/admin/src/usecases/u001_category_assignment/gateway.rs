use async_trait::async_trait;
use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::common::{EntityRef, EntitySummary};

use super::ports::{
    AssignmentMutator, CategoryCatalog, EntitySource, RecommendationSource, SuggestionSource,
};
use crate::domain::a001_category::api_client::CategoryApiClient;
use crate::domain::a002_business::api_client::BusinessApiClient;
use crate::domain::a003_service::api_client::ServiceApiClient;
use crate::shared::api::{ApiClient, ApiError};

/// Реализация портов поверх REST API: выбирает эндпоинт по виду сущности
#[derive(Clone)]
pub struct HttpCategoryGateway {
    categories: CategoryApiClient,
    businesses: BusinessApiClient,
    services: ServiceApiClient,
}

impl HttpCategoryGateway {
    pub fn new(api: ApiClient) -> Self {
        Self {
            categories: CategoryApiClient::new(api.clone()),
            businesses: BusinessApiClient::new(api.clone()),
            services: ServiceApiClient::new(api),
        }
    }

    pub fn categories(&self) -> &CategoryApiClient {
        &self.categories
    }
}

#[async_trait]
impl CategoryCatalog for HttpCategoryGateway {
    async fn fetch_all(&self) -> Result<Vec<Category>, ApiError> {
        self.categories.fetch_all().await
    }

    async fn create_category(&self, name: &str) -> Result<Category, ApiError> {
        self.categories.create(name).await
    }
}

#[async_trait]
impl RecommendationSource for HttpCategoryGateway {
    async fn fetch_recommendations(&self, entity: &EntityRef) -> Result<Vec<Category>, ApiError> {
        match entity {
            EntityRef::Business(id) => self.businesses.fetch_recommendations(id).await,
            EntityRef::Service(id) => self.services.fetch_matching(id).await,
        }
    }
}

#[async_trait]
impl SuggestionSource for HttpCategoryGateway {
    async fn fetch_suggestions(
        &self,
        entity: &EntityRef,
        query: &str,
    ) -> Result<Vec<String>, ApiError> {
        match entity {
            // для бизнеса сервер строит подсказки по сохранённому описанию
            EntityRef::Business(id) => self.businesses.fetch_suggestions(id).await,
            EntityRef::Service(_) => self.services.fetch_suggestions(query).await,
        }
    }
}

#[async_trait]
impl AssignmentMutator for HttpCategoryGateway {
    async fn assign(&self, entity: &EntityRef, category_id: &CategoryId) -> Result<(), ApiError> {
        match entity {
            EntityRef::Business(id) => self.businesses.add_category(id, category_id).await,
            EntityRef::Service(id) => self.services.add_category(id, category_id).await,
        }
    }

    async fn unassign(
        &self,
        entity: &EntityRef,
        category_id: &CategoryId,
    ) -> Result<(), ApiError> {
        match entity {
            EntityRef::Business(id) => self.businesses.remove_category(id, category_id).await,
            EntityRef::Service(id) => self.services.remove_category(id, category_id).await,
        }
    }
}

#[async_trait]
impl EntitySource for HttpCategoryGateway {
    async fn fetch_entity(&self, entity: &EntityRef) -> Result<EntitySummary, ApiError> {
        match entity {
            EntityRef::Business(id) => self.businesses.fetch_by_id(id).await.map(Into::into),
            EntityRef::Service(id) => self.services.fetch_by_id(id).await.map(Into::into),
        }
    }
}
