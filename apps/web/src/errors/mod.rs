//! Error codes for the to-do list web app.

pub mod error_code;

pub use error_code::ErrorCode;
