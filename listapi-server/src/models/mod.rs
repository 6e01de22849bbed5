//! Domain models with validation at construction
//!
//! Invalid input returns ValidationError, not panic.

pub mod list_item;
pub mod storage_name;
pub mod validation;

pub use list_item::{ItemId, ListItem};
pub use storage_name::StorageName;
pub use validation::ValidationError;
