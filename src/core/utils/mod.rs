/// Common numerical helpers
pub mod common;
