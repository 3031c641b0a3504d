//! Environment-driven configuration.

pub mod env;
pub mod identity;
pub mod todo_api;

pub use identity::IdentityConfig;
pub use todo_api::TodoApiConfig;
