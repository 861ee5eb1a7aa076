use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::models::error::ApiErrors;

use crate::error::{Error, Result};
use crate::handler::transport::Transport;

/// A named remote operation: the request body itself plus where it goes and
/// which status counts as success.
pub trait RequestAction: Serialize {
    /// Decoded body of a successful response.
    type Payload: DeserializeOwned;

    const NAME: &'static str;
    const PATH: &'static str;
    /// The only status treated as success. Any other status, 2xx included,
    /// is a failure.
    const SUCCESS: StatusCode;
}

/// Result of performing a request action.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<P> {
    Success(P),
    /// The error is kept for logging; consumers only need the variant.
    Failure(Error),
}

impl<P> Outcome<P> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

impl<P> From<Result<P>> for Outcome<P> {
    fn from(result: Result<P>) -> Self {
        match result {
            Ok(payload) => Outcome::Success(payload),
            Err(err) => Outcome::Failure(err),
        }
    }
}

/// Sends `action` once and classifies the response.
pub async fn perform<A, T>(transport: &T, action: A) -> Outcome<A::Payload>
where
    A: RequestAction,
    T: Transport + ?Sized,
{
    tracing::debug!("Processing {} request...", A::NAME);

    let outcome = Outcome::from(send(transport, action).await);

    match &outcome {
        Outcome::Success(_) => tracing::debug!("{} succeeded.", A::NAME),
        Outcome::Failure(err) => tracing::error!("{} failed: {}", A::NAME, err),
    }

    outcome
}

async fn send<A, T>(transport: &T, action: A) -> Result<A::Payload>
where
    A: RequestAction,
    T: Transport + ?Sized,
{
    let url = transport.endpoint(A::PATH);
    let body = serde_json::to_vec(&action)
        .map_err(|e| Error::Encode { reason: e.to_string() })?;

    let response = transport.post_json(&url, body).await?;

    if response.status != A::SUCCESS {
        tracing::debug!(
            "Server responded with: {} {}",
            response.status,
            String::from_utf8_lossy(&response.body)
        );

        return Err(Error::UnexpectedStatus {
            expected: A::SUCCESS,
            status: response.status,
            errors: ApiErrors::from_body(&response.body),
        });
    }

    decode(&response.body)
}

// an empty body (204) decodes like `null` so unit payloads work
fn decode<P: DeserializeOwned>(body: &[u8]) -> Result<P> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };

    serde_json::from_slice(body).map_err(|e| Error::Decode { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::{json, Value};
    use tracing_test::traced_test;

    use super::*;
    use crate::handler::stub::StubTransport;

    #[derive(Serialize)]
    struct Ping {
        value: u32,
    }

    impl RequestAction for Ping {
        type Payload = Value;

        const NAME: &'static str = "ping";
        const PATH: &'static str = "/ping/";
        const SUCCESS: StatusCode = StatusCode::CREATED;
    }

    #[derive(Serialize)]
    struct Typed;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Created {
        id: u64,
    }

    impl RequestAction for Typed {
        type Payload = Created;

        const NAME: &'static str = "typed";
        const PATH: &'static str = "/typed/";
        const SUCCESS: StatusCode = StatusCode::OK;
    }

    #[tokio::test]
    #[traced_test]
    async fn matching_status_is_success_with_unmodified_body() {
        let transport =
            StubTransport::json(StatusCode::CREATED, json!({"id": 1, "nested": {"a": [1, 2]}}));

        let outcome = perform(&transport, Ping { value: 7 }).await;

        assert_eq!(outcome, Outcome::Success(json!({"id": 1, "nested": {"a": [1, 2]}})));
        assert!(logs_contain("Processing ping request..."));
    }

    #[tokio::test]
    async fn sends_serialized_body_to_endpoint_once() {
        let transport = StubTransport::json(StatusCode::CREATED, json!({}));

        perform(&transport, Ping { value: 7 }).await;

        assert_eq!(
            transport.requests.borrow().as_slice(),
            &[("http://stub.invalid/ping/".to_string(), json!({"value": 7}))]
        );
    }

    #[tokio::test]
    async fn other_success_codes_are_failures() {
        for status in [StatusCode::OK, StatusCode::ACCEPTED, StatusCode::NO_CONTENT] {
            let transport = StubTransport::json(status, json!({"id": 1}));

            let outcome = perform(&transport, Ping { value: 1 }).await;

            assert!(
                matches!(
                    outcome,
                    Outcome::Failure(Error::UnexpectedStatus { status: s, .. }) if s == status
                ),
                "{status}: {outcome:?}"
            );
            assert_eq!(transport.calls(), 1);
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn error_status_keeps_field_errors() {
        let transport = StubTransport::json(
            StatusCode::BAD_REQUEST,
            json!({"password": ["too short"]}),
        );

        let outcome = perform(&transport, Ping { value: 1 }).await;

        let Outcome::Failure(err) = outcome else {
            panic!("expected failure");
        };
        assert_eq!(
            err.api_errors().and_then(|errors| errors.get("password")),
            Some(&["too short".to_string()][..])
        );
        assert!(logs_contain("ping failed"));
    }

    #[tokio::test]
    async fn transport_error_is_failure_without_retry() {
        let transport = StubTransport::failing(Error::Timeout {
            url: "http://stub.invalid/ping/".to_string(),
        });

        let outcome = perform(&transport, Ping { value: 1 }).await;

        assert!(matches!(outcome, Outcome::Failure(Error::Timeout { .. })));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn undecodable_body_is_failure() {
        let transport = StubTransport::raw(StatusCode::OK, b"{\"id\": \"one\"}");

        let outcome = perform(&transport, Typed).await;

        assert!(matches!(outcome, Outcome::Failure(Error::Decode { .. })));
    }

    #[tokio::test]
    async fn decodes_typed_payload() {
        let transport = StubTransport::json(StatusCode::OK, json!({"id": 3, "extra": true}));

        let outcome = perform(&transport, Typed).await;

        assert_eq!(outcome, Outcome::Success(Created { id: 3 }));
    }

    #[test]
    fn empty_body_decodes_as_null() {
        decode::<()>(b"").unwrap();
        assert_eq!(decode::<Value>(b" \n").unwrap(), Value::Null);
    }
}
