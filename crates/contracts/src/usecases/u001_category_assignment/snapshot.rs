use serde::{Deserialize, Serialize};

use crate::domain::a001_category::aggregate::{Category, CategoryId};
use crate::domain::common::EntityRef;

/// Состояние раскрывающейся панели (рекомендации, подсказки)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Hidden,
    Loading,
    Shown,
}

impl PanelState {
    pub fn is_shown(&self) -> bool {
        matches!(self, PanelState::Shown)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }
}

/// Снимок состояния редактора категорий для отрисовки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSnapshot {
    pub entity: EntityRef,
    pub current: Vec<Category>,
    pub available: Vec<Category>,
    pub recommended: Vec<Category>,
    pub recommendations: PanelState,
    pub suggestions: PanelState,
    pub suggestion_names: Vec<String>,
    pub catalog_error: Option<String>,
    pub recommendations_error: Option<String>,
    pub assigning: Vec<CategoryId>,
    pub removing: Vec<CategoryId>,
    /// Можно ли добавлять категории из каталога
    pub can_add: bool,
}
