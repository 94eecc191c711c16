use serde::{Deserialize, Serialize};

use crate::domain::a001_category::aggregate::Category;
use crate::domain::common::{EntityKind, EntityRef};

/// Операция сценария назначения категорий (для событий об ошибках и логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOperation {
    LoadCatalog,
    Assign,
    Unassign,
    Recommendations,
    Suggestions,
    CreateCategory,
}

impl CategoryOperation {
    /// Сообщение для пользователя при неудаче операции
    pub fn failure_message(&self, kind: EntityKind) -> String {
        match self {
            CategoryOperation::LoadCatalog => "Failed to fetch categories".to_string(),
            CategoryOperation::Assign => format!("Failed to add category to {}", kind.label()),
            CategoryOperation::Unassign => {
                format!("Failed to remove category from {}", kind.label())
            }
            CategoryOperation::Recommendations => {
                "Failed to fetch recommended categories".to_string()
            }
            CategoryOperation::Suggestions => "Failed to fetch category suggestions".to_string(),
            CategoryOperation::CreateCategory => {
                "Failed to create category. Please try again.".to_string()
            }
        }
    }
}

/// Событие для владельца экрана (формы бизнеса или услуги)
///
/// Список категорий всегда передаётся целиком, по значению.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryEvent {
    CategoriesChanged {
        entity: EntityRef,
        categories: Vec<Category>,
    },
    CategoryCreated {
        category: Category,
    },
    Failed {
        operation: CategoryOperation,
        message: String,
    },
}
