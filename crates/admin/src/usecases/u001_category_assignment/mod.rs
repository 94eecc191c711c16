//! Назначение категорий бизнесу или услуге
//!
//! `CategoryAssignmentExecutor` держит локальное представление категорий
//! одной сущности и согласует его с сервером через порты из `ports`.

pub mod category_set;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod ports;

pub use category_set::CategorySet;
pub use error::CategoryError;
pub use executor::CategoryAssignmentExecutor;
pub use gateway::HttpCategoryGateway;
pub use ports::CategoryBackend;
