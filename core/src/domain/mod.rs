//! Domain layer containing the account value objects.

pub mod value_objects;

pub use value_objects::*;
