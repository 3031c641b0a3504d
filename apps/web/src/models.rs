//! To-do list data carried between the backend API and the views.

use serde::{Deserialize, Serialize};

/// One to-do entry. Field names match the backend API's wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Owner")]
    pub owner: String,
}

impl TodoItem {
    pub fn new(title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            owner: owner.into(),
        }
    }
}

/// Form submitted to `POST /`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewItemForm {
    #[serde(default)]
    pub item: String,
}

impl NewItemForm {
    /// The submitted title, or `None` when it is blank.
    pub fn title(&self) -> Option<&str> {
        if self.item.trim().is_empty() {
            None
        } else {
            Some(self.item.as_str())
        }
    }
}
