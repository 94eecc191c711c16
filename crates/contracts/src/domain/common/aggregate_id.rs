use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Трейт для типов идентификаторов агрегатов
///
/// Идентификаторы выдаёт сервер, клиент считает их непрозрачными строками.
pub trait AggregateId:
    Clone + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Создать ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}

/// Общая проверка для строковых идентификаторов: пустой ID не бывает валидным.
pub fn parse_opaque_id(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Invalid id: empty string".to_string());
    }
    Ok(trimmed.to_string())
}
