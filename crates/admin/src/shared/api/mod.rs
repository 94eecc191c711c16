//! HTTP plumbing shared by all REST clients of the admin console

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
