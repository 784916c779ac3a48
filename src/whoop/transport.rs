//! The single capability the engine needs from the network: an authenticated
//! GET against a resource path that yields a status code and a body.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tokio::sync::RwLock;

use crate::error::{FetchError, Result};

// ---

/// Status and body of one HTTP exchange. Non-2xx statuses are not errors at
/// this level; the retry layer decides what they mean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    // ---
    pub status: u16,
    pub body: String,
}

/// Issue one authenticated GET. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<RawResponse>;
}

/// Shared bearer token. The auth layer replaces it on refresh; requests read
/// whatever is current when they are issued.
#[derive(Clone)]
pub struct AccessToken(Arc<RwLock<String>>);

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

impl AccessToken {
    // ---
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(Arc::new(RwLock::new(token.into())))
    }

    pub async fn current(&self) -> String {
        self.0.read().await.clone()
    }

    pub async fn replace(&self, token: impl Into<String>) {
        *self.0.write().await = token.into();
    }
}

/// [`Transport`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    // ---
    client: reqwest::Client,
    base_url: String,
    token: AccessToken,
}

impl ReqwestTransport {
    // ---
    pub fn new(base_url: impl Into<String>, token: AccessToken) -> Self {
        ReqwestTransport {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<RawResponse> {
        // ---
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let token = self.token.current().await;

        tracing::debug!("GET {} {:?}", url, query);

        let transport_err = |e: reqwest::Error| FetchError::Transport {
            path: path.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_err)?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(RawResponse { status, body })
    }
}
