pub mod event;
pub mod request;
pub mod snapshot;

pub use event::{CategoryEvent, CategoryOperation};
pub use request::AssignCategoryRequest;
pub use snapshot::{AssignmentSnapshot, PanelState};
