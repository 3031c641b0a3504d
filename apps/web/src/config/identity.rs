//! Directory (token authority) settings for the client-credential grant.

use std::fmt;

use super::env::{must_var, var_or};
use crate::error::AppError;

/// Authority template used when `IDA_AAD_INSTANCE` is not set.
pub const DEFAULT_AAD_INSTANCE: &str = "https://login.microsoftonline.com/{0}";

/// Application identity used to authenticate to the directory.
#[derive(Clone)]
pub struct IdentityConfig {
    /// Authority template; `{0}` or `{tenant}` is replaced by the tenant.
    pub aad_instance: String,
    pub tenant: String,
    pub client_id: String,
    pub client_secret: String,
}

impl IdentityConfig {
    pub fn new(
        aad_instance: impl Into<String>,
        tenant: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            aad_instance: aad_instance.into(),
            tenant: tenant.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            aad_instance: var_or("IDA_AAD_INSTANCE", DEFAULT_AAD_INSTANCE),
            tenant: must_var("IDA_TENANT")?,
            client_id: must_var("IDA_CLIENT_ID")?,
            client_secret: must_var("IDA_APP_KEY")?,
        })
    }

    /// Sign-in URL of the tenant.
    ///
    /// A template without a placeholder is treated as an instance root and
    /// the tenant is appended as the last path segment.
    pub fn authority(&self) -> String {
        if self.aad_instance.contains("{0}") || self.aad_instance.contains("{tenant}") {
            self.aad_instance
                .replace("{0}", &self.tenant)
                .replace("{tenant}", &self.tenant)
        } else {
            format!("{}/{}", self.aad_instance.trim_end_matches('/'), self.tenant)
        }
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth2/token", self.authority().trim_end_matches('/'))
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("aad_instance", &self.aad_instance)
            .field("tenant", &self.tenant)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
