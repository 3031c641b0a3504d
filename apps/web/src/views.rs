//! View models returned by the to-do list handlers.

use serde::Serialize;

use crate::models::TodoItem;

/// Title of the synthetic entry shown when the list could not be loaded.
pub const PLACEHOLDER_TITLE: &str = "(No items in list)";
/// Error marker set on views produced by a failed request.
pub const UNEXPECTED_ERROR: &str = "UnexpectedError";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoListView {
    pub items: Vec<TodoItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TodoListView {
    pub fn items(items: Vec<TodoItem>) -> Self {
        Self {
            items,
            error_message: None,
        }
    }

    /// The single-placeholder list rendered for every failure cause.
    pub fn unexpected_error() -> Self {
        Self {
            items: vec![TodoItem::new(PLACEHOLDER_TITLE, "")],
            error_message: Some(UNEXPECTED_ERROR.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }
}

/// Result of submitting a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Stored by the backend; the caller should re-fetch the list.
    Created,
    /// Token or backend failure.
    Failed(TodoListView),
    /// Form rejected before any network call.
    Invalid,
}
