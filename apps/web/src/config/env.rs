use std::env;
use std::str::FromStr;

use crate::error::AppError;

/// Get required environment variable or return error
pub fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}

/// Get optional environment variable, falling back to `default`
pub fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Parse optional environment variable, falling back to `default` when unset
pub fn parse_var_or<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!(
                "Environment variable '{name}' has an invalid value: '{raw}'"
            ))
        }),
        Err(_) => Ok(default),
    }
}
