//! To-do list request handling: token, backend call, view.
//!
//! Every failure cause collapses into [`TodoListView::unexpected_error`];
//! callers only ever see a list, a redirect, or an invalid-form outcome.

use std::sync::Arc;

use tracing::{info, warn};

use crate::extractors::CurrentUser;
use crate::logging::pii::Redacted;
use crate::models::NewItemForm;
use crate::todo_api::{TodoApiClient, TodoApiError};
use crate::token::{acquire_with_retry, AccessToken, RetryPolicy, TokenCache, TokenProvider};
use crate::views::{CreateOutcome, TodoListView};

pub struct TodoListService {
    tokens: Arc<dyn TokenProvider>,
    token_cache: Arc<dyn TokenCache>,
    api: TodoApiClient,
    resource_id: String,
    retry: RetryPolicy,
}

impl TodoListService {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        token_cache: Arc<dyn TokenCache>,
        api: TodoApiClient,
        resource_id: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            tokens,
            token_cache,
            api,
            resource_id: resource_id.into(),
            retry,
        }
    }

    /// The shared token cache, cleared when the backend rejects a token.
    pub fn token_cache(&self) -> &Arc<dyn TokenCache> {
        &self.token_cache
    }

    async fn access_token(&self) -> Option<AccessToken> {
        match acquire_with_retry(self.tokens.as_ref(), &self.resource_id, &self.retry).await {
            Ok(token) => Some(token),
            Err(err) => {
                warn!(error = %err, "no access token for the to-do API");
                None
            }
        }
    }

    /// Load the caller's items, or the placeholder view on any failure.
    pub async fn get_list(&self, user: &CurrentUser) -> TodoListView {
        let Some(token) = self.access_token().await else {
            return TodoListView::unexpected_error();
        };

        match self.api.list_items(&token, &user.owner_id).await {
            Ok(items) => {
                info!(owner = %Redacted(&user.owner_id), count = items.len(), "to-do list loaded");
                TodoListView::items(items)
            }
            Err(err) => self.backend_failure(err),
        }
    }

    /// Add an item owned by the caller.
    ///
    /// A blank title is rejected before any token or backend traffic.
    pub async fn create_item(&self, user: &CurrentUser, form: &NewItemForm) -> CreateOutcome {
        let Some(title) = form.title() else {
            return CreateOutcome::Invalid;
        };

        let Some(token) = self.access_token().await else {
            return CreateOutcome::Failed(TodoListView::unexpected_error());
        };

        match self.api.create_item(&token, title, &user.owner_id).await {
            Ok(()) => {
                info!(owner = %Redacted(&user.owner_id), "to-do item added");
                CreateOutcome::Created
            }
            Err(err) => CreateOutcome::Failed(self.backend_failure(err)),
        }
    }

    fn backend_failure(&self, err: TodoApiError) -> TodoListView {
        if err.is_unauthorized() {
            // Next request fetches a fresh token. Affects every caller.
            self.token_cache.clear();
            warn!("backend returned 401, token cache cleared");
        } else {
            warn!(error = %err, "to-do API call failed");
        }
        TodoListView::unexpected_error()
    }
}
