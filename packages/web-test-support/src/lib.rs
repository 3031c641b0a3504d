//! Test support for the to-do list web app
//!
//! Shared test logging initialization and Problem Details assertions that
//! integration tests can use without depending on the web crate's types.

pub mod logging;
pub mod problem_details;
