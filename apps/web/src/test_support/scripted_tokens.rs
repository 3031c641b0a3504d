//! A [`TokenProvider`] that replays a fixed script of outcomes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};
use tokio::time::Instant;

use crate::token::{AccessToken, TokenError, TokenProvider};

type Outcome = Result<AccessToken, TokenError>;

pub struct ScriptedTokenProvider {
    script: Mutex<VecDeque<Outcome>>,
    /// Returned once the script is exhausted.
    then: Outcome,
    attempts: AtomicUsize,
    attempt_instants: Mutex<Vec<Instant>>,
}

impl ScriptedTokenProvider {
    pub fn sequence(script: Vec<Outcome>, then: Outcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            then,
            attempts: AtomicUsize::new(0),
            attempt_instants: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding(value: &str) -> Self {
        Self::sequence(Vec::new(), Ok(Self::token(value)))
    }

    pub fn failing(err: TokenError) -> Self {
        Self::sequence(Vec::new(), Err(err))
    }

    /// A bearer token valid for an hour.
    pub fn token(value: &str) -> AccessToken {
        AccessToken::bearer(value, "todo-api", OffsetDateTime::now_utc() + Duration::hours(1))
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Tokio instants of every attempt, in order.
    pub fn attempt_instants(&self) -> Vec<Instant> {
        self.attempt_instants.lock().clone()
    }
}

#[async_trait]
impl TokenProvider for ScriptedTokenProvider {
    async fn acquire_token(&self, _resource: &str) -> Result<AccessToken, TokenError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.attempt_instants.lock().push(Instant::now());
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.then.clone())
    }
}
