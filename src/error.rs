//! Error types for Hetzner Cloud API operations.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::obfuscate::RedactedRequest;

/// Errors that can occur during Hetzner Cloud API operations.
///
/// Every variant that can describe a request only ever holds the
/// [`RedactedRequest`] form, so formatting an error never reveals the
/// API token.
#[derive(Debug, Error)]
pub enum HcloudError {
    /// Configuration is missing or incomplete.
    #[error("Hetzner Cloud configuration required: {0}")]
    ConfigMissing(String),

    /// Configuration value was rejected (e.g. a token that is not a valid header value).
    #[error("Invalid Hetzner Cloud configuration: {0}")]
    InvalidConfig(String),

    /// The response body was not valid JSON or lacked a required field.
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A successful response to `request` could not be decoded.
    #[error("Failed to decode `{status}` response to `{request}`: {source}")]
    ResponseDecode {
        request: RedactedRequest,
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered with a 4xx status.
    #[error("{0}")]
    Client(Box<HttpFailure>),

    /// The API answered with a 5xx status.
    #[error("{0}")]
    Server(Box<HttpFailure>),

    /// The API answered with an unsuccessful status outside 4xx/5xx.
    #[error("{0}")]
    UnsuccessfulRequest(Box<HttpFailure>),

    /// The request was sent but no response was received.
    #[error("Error completing request `{request}`")]
    RequestFailed {
        request: RedactedRequest,
        #[source]
        source: reqwest::Error,
    },

    /// A connection to the API could not be established.
    ///
    /// The message has already been passed through the credential
    /// obfuscator.
    #[error("{message}")]
    Connect {
        message: String,
        request: RedactedRequest,
    },

    /// Any other HTTP transport error, passed through unchanged.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An action did not reach a terminal status within the attempt budget.
    #[error("Action {action_id} did not complete within {max_attempts} attempts")]
    PollTimeout { action_id: u64, max_attempts: u32 },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl HcloudError {
    /// The HTTP status of the failed exchange, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ResponseDecode { status, .. } => Some(*status),
            _ => self.http_failure().map(|failure| failure.status),
        }
    }

    /// The redacted request that produced this error, if any.
    pub fn request(&self) -> Option<&RedactedRequest> {
        match self {
            Self::Client(failure) | Self::Server(failure) | Self::UnsuccessfulRequest(failure) => {
                Some(&failure.request)
            }
            Self::RequestFailed { request, .. }
            | Self::Connect { request, .. }
            | Self::ResponseDecode { request, .. } => Some(request),
            _ => None,
        }
    }

    /// Details of an unsuccessful HTTP exchange.
    pub fn http_failure(&self) -> Option<&HttpFailure> {
        match self {
            Self::Client(failure) | Self::Server(failure) | Self::UnsuccessfulRequest(failure) => {
                Some(failure)
            }
            _ => None,
        }
    }

    /// Returns true for 4xx responses.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client(_))
    }

    /// Returns true for 5xx responses.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server(_))
    }

    /// Returns true when a response body could not be decoded.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::ResponseDecode { .. })
    }
}

/// An HTTP exchange that completed with an unsuccessful status.
#[derive(Debug, Clone)]
pub struct HttpFailure {
    /// Human-readable description, including the optional body summary.
    pub message: String,
    /// The request with its Authorization header obfuscated.
    pub request: RedactedRequest,
    /// Response status.
    pub status: StatusCode,
    /// Raw response body, if it could be read.
    pub body: Option<String>,
}

impl HttpFailure {
    /// Parse the standard `{"error": {"code": ..., "message": ...}}` envelope
    /// out of the response body.
    pub fn api_error(&self) -> Option<ApiError> {
        #[derive(Deserialize)]
        struct Envelope {
            error: ApiError,
        }

        let body = self.body.as_deref()?;
        serde_json::from_str::<Envelope>(body)
            .ok()
            .map(|envelope| envelope.error)
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Error details returned by the API on failure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Result type alias for Hetzner Cloud operations.
pub type Result<T> = core::result::Result<T, HcloudError>;

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use url::Url;

    fn failure(status: u16, body: Option<&str>) -> HttpFailure {
        HttpFailure {
            message: "Client error".to_string(),
            request: RedactedRequest::new(
                Method::GET,
                Url::parse("https://api.hetzner.cloud/v1/servers").unwrap(),
                Some("Bearer **********".to_string()),
            ),
            status: StatusCode::from_u16(status).unwrap(),
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn test_api_error_parsed_from_body() {
        let failure = failure(
            403,
            Some(r#"{"error":{"code":"forbidden","message":"Forbidden"}}"#),
        );

        let api_error = failure.api_error().expect("envelope should parse");
        assert_eq!(api_error.code, "forbidden");
        assert_eq!(api_error.message, "Forbidden");
        assert!(api_error.details.is_none());
    }

    #[test]
    fn test_api_error_absent_for_plain_body() {
        assert!(failure(500, Some("upstream exploded")).api_error().is_none());
        assert!(failure(500, None).api_error().is_none());
    }

    #[test]
    fn test_accessors() {
        let err = HcloudError::Client(Box::new(failure(404, None)));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.request().unwrap().method(), &Method::GET);

        let timeout = HcloudError::PollTimeout {
            action_id: 7,
            max_attempts: 3,
        };
        assert_eq!(
            timeout.to_string(),
            "Action 7 did not complete within 3 attempts"
        );
        assert!(timeout.status().is_none());
        assert!(timeout.request().is_none());
    }

    #[test]
    fn test_response_decode_carries_request() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = HcloudError::ResponseDecode {
            request: failure(200, None).request,
            status: StatusCode::OK,
            source,
        };

        assert!(err.is_decode_error());
        assert_eq!(err.status(), Some(StatusCode::OK));
        assert!(err
            .to_string()
            .starts_with("Failed to decode `200 OK` response to `GET https://api.hetzner.cloud/v1/servers`: "));
        assert!(err.http_failure().is_none());
    }
}
