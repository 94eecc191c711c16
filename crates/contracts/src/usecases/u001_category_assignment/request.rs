use serde::{Deserialize, Serialize};

use crate::domain::a001_category::aggregate::CategoryId;

/// Тело запроса на привязку категории к бизнесу или услуге
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignCategoryRequest {
    pub id: CategoryId,
}
