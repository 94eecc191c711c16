use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::parse_opaque_id;
use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор категории (выдаётся сервером)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl AggregateId for CategoryId {
    fn from_string(s: &str) -> Result<Self, String> {
        parse_opaque_id(s).map(CategoryId)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Категория услуг, общая для всех бизнесов и сервисов
///
/// Имя уникально на стороне сервера, клиент это не проверяет.
/// Сравнение и дедупликация всегда идут по `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(id),
            name: name.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for Category {}

// ============================================================================
// Requests
// ============================================================================

/// Тело `POST /categories/new`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

impl CreateCategoryRequest {
    /// Проверить и нормализовать имя новой категории
    pub fn new(name: &str) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Category name is required".to_string());
        }
        Ok(Self {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_deserializes_catalog_row() {
        let json = r#"{
            "id": "42",
            "name": "Plumbing",
            "createdAt": "2025-03-01T10:00:00Z",
            "updatedAt": "2025-03-02T10:00:00Z"
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, CategoryId::new("42"));
        assert_eq!(category.name, "Plumbing");
        assert!(category.created_at.is_some());
    }

    #[test]
    fn test_category_without_timestamps_serializes_as_id_and_name() {
        let value = serde_json::to_value(Category::new("7", "Cleaning")).unwrap();
        assert_eq!(value, serde_json::json!({ "id": "7", "name": "Cleaning" }));
    }

    #[test]
    fn test_equality_ignores_timestamps() {
        let mut a = Category::new("1", "Painting");
        let b = Category::new("1", "Painting");
        a.created_at = Some(Utc::now());
        assert_eq!(a, b);
    }

    #[test]
    fn test_create_request_rejects_blank_name() {
        assert!(CreateCategoryRequest::new("  ").is_err());
        assert_eq!(
            CreateCategoryRequest::new(" Roofing ").unwrap().name,
            "Roofing"
        );
    }

    #[test]
    fn test_category_id_from_string() {
        assert!(CategoryId::from_string("").is_err());
        assert_eq!(CategoryId::from_string("abc").unwrap().value(), "abc");
    }
}
