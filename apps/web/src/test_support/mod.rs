//! Helpers shared by unit and integration tests.

pub mod app_builder;
pub mod scripted_tokens;
pub mod session;

pub use app_builder::{create_test_app_builder, TestAppBuilder};
pub use scripted_tokens::ScriptedTokenProvider;
pub use session::session_bearer;
