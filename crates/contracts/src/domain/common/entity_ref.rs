use serde::{Deserialize, Serialize};

use crate::domain::a001_category::aggregate::Category;
use crate::domain::a002_business::aggregate::BusinessId;
use crate::domain::a003_service::aggregate::ServiceId;

/// Вид сущности, к которой привязываются категории
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Business,
    Service,
}

impl EntityKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Business => "business",
            EntityKind::Service => "service",
        }
    }
}

/// Ссылка на редактируемую сущность (бизнес или услуга)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Business(BusinessId),
    Service(ServiceId),
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Business(_) => EntityKind::Business,
            EntityRef::Service(_) => EntityKind::Service,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            EntityRef::Business(id) => id.value(),
            EntityRef::Service(id) => id.value(),
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind().label(), self.id())
    }
}

/// Общая проекция бизнеса или услуги, достаточная для работы с категориями
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySummary {
    pub entity: EntityRef,
    pub name: String,
    pub description: Option<String>,
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ref_display_and_serde() {
        let entity = EntityRef::Service(ServiceId::new("s-9"));
        assert_eq!(entity.to_string(), "service s-9");
        assert_eq!(
            serde_json::to_value(&entity).unwrap(),
            serde_json::json!({ "kind": "service", "id": "s-9" })
        );
    }
}
