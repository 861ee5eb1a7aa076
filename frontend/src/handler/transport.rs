use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::Result;

/// What came back from the server, undecoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Sends a single JSON request. Implementations must not retry; a request
/// action performs exactly one attempt.
///
/// Futures are not required to be `Send`, everything runs on the current
/// thread.
#[async_trait(?Send)]
pub trait Transport {
    /// Resolves a relative api path against the configured base url.
    fn endpoint(&self, rel_path: &str) -> String;

    /// POSTs `body` as `application/json` to `url`.
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse>;
}
