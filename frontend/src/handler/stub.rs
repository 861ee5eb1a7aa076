use std::cell::RefCell;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::handler::transport::{Transport, TransportResponse};

/// Scripted transport. Answers every request the same way and records what
/// was sent.
pub(crate) struct StubTransport {
    respond: Box<dyn Fn() -> Result<TransportResponse>>,
    pub(crate) requests: RefCell<Vec<(String, Value)>>,
}

impl StubTransport {
    pub(crate) fn json(status: StatusCode, body: Value) -> Self {
        Self::raw(status, body.to_string().as_bytes())
    }

    pub(crate) fn raw(status: StatusCode, body: &[u8]) -> Self {
        let body = body.to_vec();
        Self::new(move || Ok(TransportResponse { status, body: body.clone() }))
    }

    pub(crate) fn failing(err: Error) -> Self {
        Self::new(move || Err(err.clone()))
    }

    fn new(respond: impl Fn() -> Result<TransportResponse> + 'static) -> Self {
        Self { respond: Box::new(respond), requests: RefCell::new(Vec::new()) }
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for StubTransport {
    fn endpoint(&self, rel_path: &str) -> String {
        format!("http://stub.invalid{rel_path}")
    }

    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse> {
        let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
        self.requests.borrow_mut().push((url.to_string(), body));

        // behave like a real request and give other tasks a turn
        tokio::task::yield_now().await;

        (self.respond)()
    }
}
