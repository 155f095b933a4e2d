//! Classification of failed HTTP exchanges into typed errors.

use reqwest::StatusCode;

use crate::error::{HcloudError, HttpFailure};
use crate::obfuscate::{obfuscate, RedactedRequest};

/// Longest body excerpt appended to an error message.
const BODY_SUMMARY_LIMIT: usize = 120;

/// Classify a completed exchange whose status is at least 400.
///
/// 4xx becomes [`HcloudError::Client`], 5xx [`HcloudError::Server`], any
/// other status [`HcloudError::UnsuccessfulRequest`].
pub fn classify_response(
    request: RedactedRequest,
    status: StatusCode,
    body: Option<String>,
) -> HcloudError {
    let label = match status.as_u16() / 100 {
        4 => "Client error",
        5 => "Server error",
        _ => "Unsuccessful request",
    };

    let mut message = format!(
        "{label}: `{} {}` resulted in a `{} {}` response",
        request.method(),
        request.url(),
        status.as_u16(),
        status.canonical_reason().unwrap_or(""),
    );

    if let Some(summary) = body.as_deref().and_then(summarize_body) {
        message.push_str(":\n");
        message.push_str(&summary);
        message.push('\n');
    }

    let failure = Box::new(HttpFailure {
        message,
        request,
        status,
        body,
    });

    match status.as_u16() / 100 {
        4 => HcloudError::Client(failure),
        5 => HcloudError::Server(failure),
        _ => HcloudError::UnsuccessfulRequest(failure),
    }
}

/// Classify a transport failure where no response was received.
///
/// Connect failures are re-raised with their message obfuscated; timeouts
/// and request-level failures become [`HcloudError::RequestFailed`]; any
/// other error passes through unchanged.
pub fn classify_transport(request: RedactedRequest, err: reqwest::Error) -> HcloudError {
    if err.is_connect() {
        return connect_failure(request, &error_chain(&err));
    }

    if err.is_timeout() || err.is_request() {
        return HcloudError::RequestFailed {
            request,
            source: err,
        };
    }

    HcloudError::Http(err)
}

/// Build a connect error, redacting any credential in `message`.
pub fn connect_failure(request: RedactedRequest, message: &str) -> HcloudError {
    HcloudError::Connect {
        message: obfuscate(message),
        request,
    }
}

/// Short, printable excerpt of a response body.
///
/// Returns `None` for empty bodies and bodies containing control characters.
pub fn summarize_body(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
    {
        return None;
    }

    if trimmed.chars().count() > BODY_SUMMARY_LIMIT {
        let excerpt: String = trimmed.chars().take(BODY_SUMMARY_LIMIT).collect();
        return Some(format!("{excerpt} (truncated...)"));
    }

    Some(trimmed.to_string())
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
