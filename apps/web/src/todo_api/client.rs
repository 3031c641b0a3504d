use std::collections::HashMap;

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TodoApiConfig;
use crate::error::AppError;
use crate::logging::pii::{redact, Redacted};
use crate::models::TodoItem;
use crate::token::AccessToken;

pub const TODO_LIST_PATH: &str = "/api/todolist";

#[derive(Debug, Error)]
pub enum TodoApiError {
    /// 401: the access token was rejected.
    #[error("backend rejected the access token")]
    Unauthorized,
    #[error("backend returned status {0}")]
    Status(StatusCode),
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TodoApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TodoApiError::Unauthorized)
    }
}

#[derive(Serialize)]
struct NewTodoItem<'a> {
    #[serde(rename = "Title")]
    title: &'a str,
    #[serde(rename = "Owner")]
    owner: &'a str,
}

pub struct TodoApiClient {
    base_address: String,
    http: Client,
}

impl TodoApiClient {
    pub fn new(config: &TodoApiConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("failed to build backend HTTP client: {e}")))?;
        Ok(Self::with_http_client(&config.base_address, http))
    }

    /// Create a client with a custom `reqwest::Client`.
    pub fn with_http_client(base_address: &str, http: Client) -> Self {
        Self {
            base_address: base_address.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{TODO_LIST_PATH}", self.base_address)
    }

    /// `GET /api/todolist?ownerid=...`, in backend order.
    pub async fn list_items(
        &self,
        token: &AccessToken,
        owner_id: &str,
    ) -> Result<Vec<TodoItem>, TodoApiError> {
        debug!(owner = %Redacted(owner_id), "fetching to-do list");

        let response = self
            .http
            .get(self.collection_url())
            .query(&[("ownerid", owner_id)])
            .bearer_auth(&token.value)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body = response.text().await?;
        let records: Vec<HashMap<String, Value>> = serde_json::from_str(&body)?;

        Ok(records.iter().map(item_from_record).collect())
    }

    /// `POST /api/todolist` with a form-encoded `Title`/`Owner` body.
    pub async fn create_item(
        &self,
        token: &AccessToken,
        title: &str,
        owner_id: &str,
    ) -> Result<(), TodoApiError> {
        debug!(owner = %Redacted(owner_id), "adding to-do item");

        let response = self
            .http
            .post(self.collection_url())
            .bearer_auth(&token.value)
            .form(&NewTodoItem {
                title,
                owner: owner_id,
            })
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, TodoApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(
        status = %status,
        body = %redact(body.chars().take(256).collect::<String>().as_str()),
        "backend request failed"
    );

    if status == StatusCode::UNAUTHORIZED {
        Err(TodoApiError::Unauthorized)
    } else {
        Err(TodoApiError::Status(status))
    }
}

/// Copy `Title` and `Owner` out of a flat record. Missing keys and nulls
/// become empty strings; other scalars keep their JSON text.
fn item_from_record(record: &HashMap<String, Value>) -> TodoItem {
    TodoItem {
        title: field_as_string(record, "Title"),
        owner: field_as_string(record, "Owner"),
    }
}

fn field_as_string(record: &HashMap<String, Value>, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
