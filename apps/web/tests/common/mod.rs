#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use todolist_web::services::TodoListService;
use todolist_web::state::{AppState, SecurityConfig};
use todolist_web::test_support::ScriptedTokenProvider;
use todolist_web::todo_api::TodoApiClient;
use todolist_web::token::{AccessToken, CacheKey, InMemoryTokenCache, RetryPolicy, TokenCache};
use wiremock::MockServer;

// Logging is auto-installed for every test binary that declares `mod common`.
#[ctor::ctor]
fn init_logging() {
    web_test_support::logging::init();
}

pub const RESOURCE: &str = "https://contoso.onmicrosoft.com/TodoListService";
pub const OWNER: &str = "6c1f5c3e-0b3a-4c6d-9d2e-6f0f0f0f0f01";
pub const JWT_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// Same attempt budget as production with a delay short enough for real time.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(10))
}

pub fn security() -> SecurityConfig {
    SecurityConfig::new(JWT_SECRET)
}

/// A cache that already holds one valid entry.
pub fn warm_cache() -> Arc<InMemoryTokenCache> {
    let cache = Arc::new(InMemoryTokenCache::new());
    cache.set(
        CacheKey::new("web-app", RESOURCE),
        ScriptedTokenProvider::token("cached-token"),
    );
    cache
}

pub fn service_with(
    provider: Arc<ScriptedTokenProvider>,
    cache: Arc<InMemoryTokenCache>,
    backend_uri: &str,
) -> TodoListService {
    TodoListService::new(
        provider,
        cache,
        TodoApiClient::with_http_client(backend_uri, Client::new()),
        RESOURCE,
        fast_retry(),
    )
}

pub fn state_with(
    provider: Arc<ScriptedTokenProvider>,
    cache: Arc<InMemoryTokenCache>,
    backend: &MockServer,
) -> AppState {
    AppState::new(security(), service_with(provider, cache, &backend.uri()))
}

pub fn token(value: &str) -> AccessToken {
    ScriptedTokenProvider::token(value)
}
