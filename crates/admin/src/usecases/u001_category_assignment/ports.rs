use async_trait::async_trait;
use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::common::{EntityRef, EntitySummary};

use crate::shared::api::ApiError;

/// Каталог всех известных категорий
#[async_trait]
pub trait CategoryCatalog: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Category>, ApiError>;

    async fn create_category(&self, name: &str) -> Result<Category, ApiError>;
}

/// Рекомендации сервера по уже заполненным данным сущности
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch_recommendations(&self, entity: &EntityRef) -> Result<Vec<Category>, ApiError>;
}

/// Свободные подсказки названий категорий (ещё не существующих)
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch_suggestions(
        &self,
        entity: &EntityRef,
        query: &str,
    ) -> Result<Vec<String>, ApiError>;
}

/// Привязка и отвязка категории
#[async_trait]
pub trait AssignmentMutator: Send + Sync {
    async fn assign(&self, entity: &EntityRef, category_id: &CategoryId) -> Result<(), ApiError>;

    async fn unassign(&self, entity: &EntityRef, category_id: &CategoryId)
        -> Result<(), ApiError>;
}

/// Загрузка карточки сущности с текущими категориями
#[async_trait]
pub trait EntitySource: Send + Sync {
    async fn fetch_entity(&self, entity: &EntityRef) -> Result<EntitySummary, ApiError>;
}

/// Всё, что нужно исполнителю сценария
pub trait CategoryBackend:
    CategoryCatalog + RecommendationSource + SuggestionSource + AssignmentMutator + EntitySource
{
}

impl<T> CategoryBackend for T where
    T: CategoryCatalog + RecommendationSource + SuggestionSource + AssignmentMutator + EntitySource
{
}
