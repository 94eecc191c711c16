use serde::{Deserialize, Serialize};

use crate::domain::a001_category::aggregate::Category;
use crate::domain::common::aggregate_id::parse_opaque_id;
use crate::domain::common::{AggregateId, EntityRef, EntitySummary};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор бизнеса
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessId(pub String);

impl BusinessId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AggregateId for BusinessId {
    fn from_string(s: &str) -> Result<Self, String> {
        parse_opaque_id(s).map(BusinessId)
    }
}

impl std::fmt::Display for BusinessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Контакты бизнеса
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessContacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Бизнес (поставщик услуг на маркетплейсе)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: BusinessId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacts: Option<BusinessContacts>,

    /// Назначенные категории в порядке, который вернул сервер
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Business {
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::Business(self.id.clone())
    }
}

impl From<Business> for EntitySummary {
    fn from(business: Business) -> Self {
        Self {
            entity: EntityRef::Business(business.id),
            name: business.name,
            description: business.description,
            categories: business.categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_without_categories_defaults_to_empty() {
        let json = r#"{ "id": "b1", "name": "Acme", "contacts": { "phone": "+100" } }"#;
        let business: Business = serde_json::from_str(json).unwrap();
        assert!(business.categories.is_empty());
        assert_eq!(
            business.contacts.unwrap().phone.as_deref(),
            Some("+100")
        );
    }

    #[test]
    fn test_business_into_summary() {
        let json = r#"{
            "id": "b1",
            "name": "Acme",
            "description": "Pipes and drains",
            "categories": [{ "id": "1", "name": "Plumbing" }]
        }"#;
        let business: Business = serde_json::from_str(json).unwrap();
        let summary = EntitySummary::from(business);
        assert_eq!(summary.entity, EntityRef::Business(BusinessId::new("b1")));
        assert_eq!(summary.description.as_deref(), Some("Pipes and drains"));
        assert_eq!(summary.categories.len(), 1);
    }
}
