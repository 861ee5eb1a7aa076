use reqwest::StatusCode;
use shared::models::error::ApiErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reason a request action ended in a failure.
///
/// Consumers only need to know that the action failed; the variant is kept
/// around for logging and for callers that want to show field errors.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum Error {
    #[display(fmt = "Invalid configuration: {}", reason)]
    Config { reason: String },

    #[display(fmt = "Failed to encode request body: {}", reason)]
    Encode { reason: String },

    #[display(fmt = "Could not reach {}: {}", url, reason)]
    Unreachable { url: String, reason: String },

    #[display(fmt = "Request to {} timed out", url)]
    Timeout { url: String },

    #[display(fmt = "Expected status {} but server responded with {}", expected, status)]
    UnexpectedStatus {
        expected: StatusCode,
        status: StatusCode,
        errors: ApiErrors,
    },

    #[display(fmt = "Failed to decode response body: {}", reason)]
    Decode { reason: String },
}

impl Error {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout { url: url.to_string() }
        } else {
            Error::Unreachable { url: url.to_string(), reason: err.to_string() }
        }
    }

    /// Field level validation messages, if the server sent any.
    pub fn api_errors(&self) -> Option<&ApiErrors> {
        match self {
            Error::UnexpectedStatus { errors, .. } if !errors.is_empty() => {
                Some(errors)
            }
            _ => None,
        }
    }
}
