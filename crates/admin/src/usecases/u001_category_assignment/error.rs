use contracts::domain::a001_category::aggregate::CategoryId;
use thiserror::Error;

use crate::shared::api::ApiError;

/// Ошибки сценария назначения категорий
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Category {0} is already assigned")]
    AlreadyAssigned(CategoryId),

    #[error("Category {0} is not assigned")]
    NotAssigned(CategoryId),

    #[error("Category {0} is not among the recommendations")]
    NotRecommended(CategoryId),

    /// Запрос по этой категории уже выполняется (кнопка заблокирована)
    #[error("A request for category {0} is already in flight")]
    InFlight(CategoryId),

    #[error("Recommendations are still loading")]
    RecommendationsLoading,

    #[error("Suggestions are still loading")]
    SuggestionsLoading,

    /// Редактор закрыт, ответ сервера не применяется
    #[error("Category editor was closed")]
    Cancelled,
}
