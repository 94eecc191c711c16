pub mod a001_category;
pub mod a002_business;
pub mod a003_service;
