//! In-memory transport for unit tests

use crate::fetch::Transport;
use crate::FeedError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Replays scripted responses and counts attempts
///
/// Once the script runs out, every further call returns `fallback`.
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Result<String, FeedError>>>,
    fallback: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<Result<String, FeedError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn always_ok(body: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<String, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match (next, &self.fallback) {
            (Some(result), _) => result,
            (None, Some(body)) => Ok(body.clone()),
            (None, None) => Err(FeedError::Unreachable {
                url: url.to_string(),
                message: "script exhausted".to_string(),
            }),
        }
    }
}
