use serde::{Deserialize, Serialize};

use crate::domain::a001_category::aggregate::Category;
use crate::domain::common::aggregate_id::parse_opaque_id;
use crate::domain::common::{AggregateId, EntityRef, EntitySummary};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор услуги бизнеса
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl AggregateId for ServiceId {
    fn from_string(s: &str) -> Result<Self, String> {
        parse_opaque_id(s).map(ServiceId)
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Услуга, которую предлагает бизнес
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Service {
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::Service(self.id.clone())
    }
}

impl From<Service> for EntitySummary {
    fn from(service: Service) -> Self {
        Self {
            entity: EntityRef::Service(service.id),
            name: service.name,
            description: service.description,
            categories: service.categories,
        }
    }
}

/// Тело `POST /admin/service/categories/suggestions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySuggestionsRequest {
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_ignores_unknown_fields() {
        let json = r#"{
            "id": "s1",
            "name": "Drain cleaning",
            "assets": [{ "id": "a1", "url": "http://x" }]
        }"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.entity_ref(), EntityRef::Service(ServiceId::new("s1")));
        assert!(service.categories.is_empty());
    }
}
