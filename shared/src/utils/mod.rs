//! Common utility functions

pub mod encoding;

pub use encoding::{from_base64, to_base64};
