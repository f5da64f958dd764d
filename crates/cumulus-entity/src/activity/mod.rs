//! Activity log entity.

pub mod model;

pub use model::{ActivityAction, ActivityRecord, CreateActivity};
