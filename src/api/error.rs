// src/api/error.rs
// =============================================================================
// The one error type every API call returns.
//
// Whatever goes wrong (timeout, no connection, a 404 from the server, a body
// we can't read) ends up as a RequestError with four pieces:
//   - status_code: HTTP status, or 0 / 504 / 500 for failures we synthesize
//   - kind: a short machine-friendly name ("Timeout", "NotFound", ...)
//   - message: a human-readable explanation
//   - details: optional extra JSON from the server (validation issues, etc.)
//
// Rust concepts:
// - thiserror: derives std::error::Error and Display for us
// - Enums with data: ErrorKind::Server carries the server's own kind string
// =============================================================================

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Classification of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ErrorKind {
    /// The call didn't finish within its timeout
    Timeout,
    /// No response was received at all
    NetworkError,
    /// The server's error body wasn't the JSON we expected
    ParseError,
    /// Anything we couldn't classify
    UnknownError,
    /// A kind reported by the server, forwarded verbatim
    Server(String),
}

impl ErrorKind {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorKind::Timeout => "Timeout",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::UnknownError => "UnknownError",
            ErrorKind::Server(kind) => kind,
        }
    }
}

impl From<&str> for ErrorKind {
    fn from(kind: &str) -> Self {
        match kind {
            "Timeout" => ErrorKind::Timeout,
            "NetworkError" => ErrorKind::NetworkError,
            "ParseError" => ErrorKind::ParseError,
            "UnknownError" => ErrorKind::UnknownError,
            other => ErrorKind::Server(other.to_string()),
        }
    }
}

impl From<ErrorKind> for String {
    fn from(kind: ErrorKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed API request.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{kind} ({status_code}): {message}")]
pub struct RequestError {
    pub status_code: u16,
    #[serde(rename = "error")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl RequestError {
    pub fn new(
        status_code: u16,
        kind: impl Into<ErrorKind>,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        Self {
            status_code,
            kind: kind.into(),
            message: message.into(),
            details,
        }
    }

    /// The call was aborted by its timeout
    pub fn timeout() -> Self {
        Self::new(
            504,
            ErrorKind::Timeout,
            "Request timed out. Please try again.",
            None,
        )
    }

    /// The request never got a response
    pub fn network() -> Self {
        Self::new(
            0,
            ErrorKind::NetworkError,
            "Unable to connect to the server. Please check your internet connection.",
            None,
        )
    }

    /// Catch-all; keeps the original error's message
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(500, ErrorKind::UnknownError, message, None)
    }

    /// Builds the error for a non-2xx response from its status and raw body.
    ///
    /// The body must be a JSON object; anything else becomes a ParseError
    /// that still carries the response's status code. Inside the object each
    /// field is read on its own, so an `error` that isn't a string falls back
    /// to its default without losing the server's `message`.
    pub fn from_response_body(status_code: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<Map<String, Value>>(body) {
            Ok(fields) => Self::new(
                status_code,
                text_field(&fields, "error").unwrap_or("UnknownError"),
                text_field(&fields, "message").unwrap_or("An unknown error occurred"),
                fields.get("details").filter(|d| !d.is_null()).cloned(),
            ),
            Err(_) => Self::new(
                status_code,
                ErrorKind::ParseError,
                "Failed to parse error response",
                None,
            ),
        }
    }

    /// 4xx: the request itself was wrong, retrying won't help
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_timeout(&self) -> bool {
        self.status_code == 504
    }

    pub fn is_network_error(&self) -> bool {
        self.kind == ErrorKind::NetworkError
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status_code == 429
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self.status_code, 401 | 403)
    }

    /// A short, user-facing message for the status code
    pub fn status_message(&self) -> &'static str {
        match self.status_code {
            400 => "Invalid request. Please check your input.",
            401 => "You need to be logged in to perform this action.",
            403 => "You do not have permission to perform this action.",
            404 => "The requested resource was not found.",
            409 => "This resource already exists.",
            429 => "Too many requests. Please try again later.",
            500 => "A server error occurred. Please try again later.",
            502 | 503 => "Service temporarily unavailable. Please try again.",
            504 => "Request timeout. Please try again.",
            _ => "An error occurred. Please try again.",
        }
    }

    /// Flattens validation details into printable lines.
    ///
    /// Understands a plain array (strings or objects with a `message`) and
    /// the `{issues: [{path, message}]}` shape.
    pub fn validation_messages(&self) -> Vec<String> {
        match &self.details {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| other.to_string()),
                })
                .collect(),
            Some(Value::Object(map)) => match map.get("issues") {
                Some(Value::Array(issues)) => issues.iter().map(format_issue).collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}

// The failure envelope the API sends: {success: false, error, message, statusCode, details?}
// statusCode is ignored; the status always comes from the response itself.
fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn format_issue(issue: &Value) -> String {
    let message = issue
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let path = issue
        .get("path")
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .map(|segment| match segment {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        })
        .unwrap_or_default();

    if path.is_empty() {
        message.to_string()
    } else {
        format!("{}: {}", path, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_structured_body_is_forwarded() {
        let body = br#"{"success":false,"error":"NotFound","message":"no such id","statusCode":404}"#;
        let error = RequestError::from_response_body(404, body);

        assert_eq!(error.status_code, 404);
        assert_eq!(error.kind, ErrorKind::Server("NotFound".to_string()));
        assert_eq!(error.message, "no such id");
        assert!(error.details.is_none());
        assert!(error.is_client_error());
    }

    #[test]
    fn test_unparseable_body_keeps_status() {
        let error = RequestError::from_response_body(502, b"<html>Bad Gateway</html>");
        assert_eq!(error.status_code, 502);
        assert_eq!(error.kind, ErrorKind::ParseError);
        assert_eq!(error.message, "Failed to parse error response");
    }

    #[test]
    fn test_non_object_json_is_a_parse_error() {
        let error = RequestError::from_response_body(500, b"[1, 2, 3]");
        assert_eq!(error.kind, ErrorKind::ParseError);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let error = RequestError::from_response_body(503, br#"{"error":"","details":null}"#);
        assert_eq!(error.kind, ErrorKind::UnknownError);
        assert_eq!(error.message, "An unknown error occurred");
        assert!(error.details.is_none());
    }

    #[test]
    fn test_wrongly_typed_fields_fall_back_individually() {
        let error =
            RequestError::from_response_body(422, br#"{"error":42,"message":"name required"}"#);
        assert_eq!(error.status_code, 422);
        assert_eq!(error.kind, ErrorKind::UnknownError);
        assert_eq!(error.message, "name required");

        let error = RequestError::from_response_body(
            400,
            br#"{"error":"ValidationError","message":["a","b"],"details":["a","b"]}"#,
        );
        assert_eq!(error.kind, ErrorKind::Server("ValidationError".to_string()));
        assert_eq!(error.message, "An unknown error occurred");
        assert_eq!(error.validation_messages(), vec!["a", "b"]);
    }

    #[test]
    fn test_status_code_comes_from_response_not_body() {
        let error = RequestError::from_response_body(
            422,
            br#"{"error":"ValidationError","message":"bad","statusCode":400}"#,
        );
        assert_eq!(error.status_code, 422);
    }

    #[test]
    fn test_synthesized_errors() {
        let timeout = RequestError::timeout();
        assert_eq!((timeout.status_code, timeout.kind.as_str()), (504, "Timeout"));
        assert!(timeout.is_timeout());

        let network = RequestError::network();
        assert_eq!((network.status_code, network.kind.as_str()), (0, "NetworkError"));
        assert!(network.is_network_error());
        assert!(!network.is_client_error());

        let unknown = RequestError::unknown("boom");
        assert_eq!((unknown.status_code, unknown.message.as_str()), (500, "boom"));
    }

    #[test]
    fn test_status_predicates_and_messages() {
        let limited = RequestError::new(429, "RateLimited", "slow down", None);
        assert!(limited.is_rate_limited());
        assert_eq!(limited.status_message(), "Too many requests. Please try again later.");

        let forbidden = RequestError::new(403, "Forbidden", "no", None);
        assert!(forbidden.is_auth_error());

        let teapot = RequestError::new(418, "Teapot", "short and stout", None);
        assert_eq!(teapot.status_message(), "An error occurred. Please try again.");
    }

    #[test]
    fn test_validation_messages_from_array() {
        let error = RequestError::new(
            400,
            "ValidationError",
            "invalid",
            Some(json!(["name is required", {"message": "year too old"}, {"code": 7}])),
        );
        assert_eq!(
            error.validation_messages(),
            vec!["name is required", "year too old", r#"{"code":7}"#]
        );
    }

    #[test]
    fn test_validation_messages_from_issues() {
        let error = RequestError::new(
            400,
            "ValidationError",
            "invalid",
            Some(json!({"issues": [
                {"path": ["salaryRange", "min"], "message": "must be positive"},
                {"path": [], "message": "body required"}
            ]})),
        );
        assert_eq!(
            error.validation_messages(),
            vec!["salaryRange.min: must be positive", "body required"]
        );
    }

    #[test]
    fn test_serializes_like_the_failure_envelope() {
        let error = RequestError::new(404, "NotFound", "no such id", None);
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"statusCode": 404, "error": "NotFound", "message": "no such id"})
        );
    }
}
