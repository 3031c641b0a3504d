//! Client for the backend to-do list API.

pub mod client;

pub use client::{TodoApiClient, TodoApiError, TODO_LIST_PATH};
