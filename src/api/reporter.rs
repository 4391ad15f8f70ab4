// src/api/reporter.rs
// =============================================================================
// Where failed requests get recorded.
//
// The client doesn't know about any particular error-tracking service. It is
// handed something that implements ErrorReporter and calls it once for every
// error it returns. The default, TracingReporter, turns failures into
// `tracing` events; a subscriber decides where those end up.
//
// Rust concepts:
// - Traits: an interface the client depends on instead of a concrete type
// - Send + Sync: the reporter is shared across async tasks via Arc
// =============================================================================

use crate::api::error::RequestError;
use crate::config::Environment;
use reqwest::header::HeaderMap;
use reqwest::Method;

// Never written to logs
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// What we know about the request that failed
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub url: &'a str,
    pub method: &'a Method,
    /// Headers as they were sent, including the default Content-Type
    pub headers: &'a HeaderMap,
}

impl RequestContext<'_> {
    /// Headers that are safe to log, in the order they were sent.
    ///
    /// Credentials are left out, and so are values that aren't valid text.
    pub fn visible_headers(&self) -> Vec<(&str, &str)> {
        self.headers
            .iter()
            .filter(|(name, _)| !SENSITIVE_HEADERS.contains(&name.as_str()))
            .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
            .collect()
    }
}

/// Records a failure together with the request that produced it.
pub trait ErrorReporter: Send + Sync {
    fn record(&self, error: &RequestError, context: &RequestContext<'_>);
}

/// Reports failures as tracing events.
///
/// In development the whole error is logged for a human to read. In
/// production a compact event goes to the `error_tracking` target, which is
/// what an exporter layer would pick up.
#[derive(Debug, Clone, Copy)]
pub struct TracingReporter {
    environment: Environment,
}

impl TracingReporter {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }
}

impl ErrorReporter for TracingReporter {
    fn record(&self, error: &RequestError, context: &RequestContext<'_>) {
        match self.environment {
            Environment::Development => {
                tracing::error!(
                    url = context.url,
                    method = %context.method,
                    headers = ?context.visible_headers(),
                    status = error.status_code,
                    kind = %error.kind,
                    details = ?error.details,
                    "Error: {}",
                    error.message
                );
            }
            Environment::Production => {
                tracing::error!(
                    target: "error_tracking",
                    url = context.url,
                    method = %context.method,
                    headers = ?context.visible_headers(),
                    status = error.status_code,
                    kind = %error.kind,
                    "{}",
                    error.message
                );
            }
        }
    }
}
