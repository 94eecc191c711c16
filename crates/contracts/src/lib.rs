//! Общие контракты админки маркетплейса: агрегаты, DTO запросов и события
//! сценария назначения категорий.

pub mod domain;
pub mod usecases;
