//! Per-request retry handling for the WHOOP API.
//!
//! Each call to [`WhoopClient::get`] walks an explicit state machine:
//!
//! ```text
//! Idle -> AwaitingResponse -> Backoff -> AwaitingResponse -> ... -> Succeeded | NotFound | Failed
//! ```
//!
//! Only 429 moves to `Backoff`. 404 ends in `NotFound`, which callers see as
//! `Ok(None)`. Every other non-2xx status fails on the spot.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::transport::{RawResponse, Transport};
use crate::error::{FetchError, Result};

// ---

/// Backoff settings for rate-limited requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    // ---
    /// Retries after the first 429; total attempts are `max_retries + 1`.
    pub max_retries: u32,
    /// Delay before the first retry. Doubles on every further retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug)]
enum RequestState {
    // ---
    Idle,
    AwaitingResponse { attempt: u32, next_delay: Duration },
    Backoff { attempt: u32, delay: Duration },
    Succeeded(String),
    NotFound,
    Failed(FetchError),
}

/// Authenticated, rate-limit aware access to the WHOOP API.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct WhoopClient {
    // ---
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl WhoopClient {
    // ---
    pub fn new(transport: Arc<dyn Transport>, retry: RetryPolicy) -> Self {
        WhoopClient { transport, retry }
    }

    /// GET `path` and return the body of a 2xx response.
    ///
    /// Returns `Ok(None)` on 404 (the collection does not exist for this
    /// user). Fails with [`FetchError::RateLimited`] once 429 persists past
    /// the retry budget.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<Option<String>> {
        // ---
        let mut state = RequestState::Idle;

        loop {
            state = match state {
                RequestState::Idle => RequestState::AwaitingResponse {
                    attempt: 0,
                    next_delay: self.retry.initial_backoff,
                },
                RequestState::AwaitingResponse {
                    attempt,
                    next_delay,
                } => match self.transport.get(path, query).await {
                    Ok(response) => self.on_response(path, response, attempt, next_delay),
                    Err(e) => RequestState::Failed(e),
                },
                RequestState::Backoff { attempt, delay } => {
                    warn!(
                        "WHOOP API rate limit hit for {} - retry {}/{} after {}ms",
                        path,
                        attempt + 1,
                        self.retry.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    RequestState::AwaitingResponse {
                        attempt: attempt + 1,
                        next_delay: delay.saturating_mul(2),
                    }
                }
                RequestState::Succeeded(body) => return Ok(Some(body)),
                RequestState::NotFound => return Ok(None),
                RequestState::Failed(e) => return Err(e),
            };
        }
    }

    fn on_response(
        &self,
        path: &str,
        response: RawResponse,
        attempt: u32,
        next_delay: Duration,
    ) -> RequestState {
        // ---
        match response.status {
            200..=299 => RequestState::Succeeded(response.body),
            404 => {
                debug!("{} returned 404, treating as no data", path);
                RequestState::NotFound
            }
            429 if attempt < self.retry.max_retries => RequestState::Backoff {
                attempt,
                delay: next_delay,
            },
            429 => RequestState::Failed(FetchError::RateLimited {
                path: path.to_string(),
            }),
            status @ (401 | 403) => RequestState::Failed(FetchError::Unauthorized {
                status,
                path: path.to_string(),
            }),
            status => RequestState::Failed(FetchError::Upstream {
                status,
                path: path.to_string(),
            }),
        }
    }
}
