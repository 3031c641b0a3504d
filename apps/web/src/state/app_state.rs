use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::services::TodoListService;

/// Application state shared by every worker
#[derive(Clone)]
pub struct AppState {
    /// Session token verification settings
    pub security: SecurityConfig,
    /// To-do list handler, holding the process-wide token cache
    pub todo_list: Arc<TodoListService>,
}

impl AppState {
    pub fn new(security: SecurityConfig, todo_list: TodoListService) -> Self {
        Self {
            security,
            todo_list: Arc::new(todo_list),
        }
    }
}
