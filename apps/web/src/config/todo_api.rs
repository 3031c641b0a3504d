//! Backend to-do list API settings.

use std::time::Duration;

use super::env::{must_var, parse_var_or};
use crate::error::AppError;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct TodoApiConfig {
    /// App ID URI the access token is requested for.
    pub resource_id: String,
    pub base_address: String,
    /// Upper bound for every outbound call (token authority included).
    pub timeout: Duration,
}

impl TodoApiConfig {
    pub fn new(resource_id: impl Into<String>, base_address: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            base_address: base_address.into(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        let timeout_secs = parse_var_or("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(AppError::config("HTTP_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Self {
            resource_id: must_var("TODO_LIST_RESOURCE_ID")?,
            base_address: must_var("TODO_LIST_BASE_ADDRESS")?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
