use std::sync::Arc;

use crate::config::{IdentityConfig, TodoApiConfig};
use crate::error::AppError;
use crate::services::TodoListService;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::todo_api::TodoApiClient;
use crate::token::{
    ClientCredentialAuthority, InMemoryTokenCache, RetryPolicy, TokenCache, TokenProvider,
};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    identity: Option<IdentityConfig>,
    todo_api: Option<TodoApiConfig>,
    token_provider: Option<Arc<dyn TokenProvider>>,
    token_cache: Option<Arc<dyn TokenCache>>,
    retry_policy: RetryPolicy,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            identity: None,
            todo_api: None,
            token_provider: None,
            token_cache: None,
            retry_policy: RetryPolicy::default(),
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_identity(mut self, identity: IdentityConfig) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_todo_api(mut self, todo_api: TodoApiConfig) -> Self {
        self.todo_api = Some(todo_api);
        self
    }

    /// Replace the client-credential authority (tests).
    pub fn with_token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    pub fn with_token_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
        self.token_cache = Some(cache);
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn build(self) -> Result<AppState, AppError> {
        let todo_api = self
            .todo_api
            .ok_or_else(|| AppError::config("to-do API configuration is required"))?;

        let token_cache: Arc<dyn TokenCache> = self
            .token_cache
            .unwrap_or_else(|| Arc::new(InMemoryTokenCache::new()));

        let token_provider: Arc<dyn TokenProvider> = match self.token_provider {
            Some(provider) => provider,
            None => {
                let identity = self
                    .identity
                    .ok_or_else(|| AppError::config("identity configuration is required"))?;
                Arc::new(ClientCredentialAuthority::new(
                    &identity,
                    Arc::clone(&token_cache),
                    todo_api.timeout,
                )?)
            }
        };

        let api = TodoApiClient::new(&todo_api)?;
        let todo_list = TodoListService::new(
            token_provider,
            token_cache,
            api,
            todo_api.resource_id,
            self.retry_policy,
        );

        Ok(AppState::new(self.security_config, todo_list))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
