//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod entity_ref;

// Re-exports
pub use aggregate_id::AggregateId;
pub use entity_ref::{EntityKind, EntityRef, EntitySummary};
