//! Collaborator services consumed by the domain layer.

pub mod date_time;

pub use date_time::{DateTimeProvider, ManualDateTimeProvider, SystemDateTimeProvider};
