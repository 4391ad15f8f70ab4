// src/api/client.rs
// =============================================================================
// The HTTP client every API call goes through.
//
// Key functionality:
// - Sends one request with the caller's headers, adding a JSON content type
//   when the caller didn't set one
// - Gives up after a timeout (30 seconds unless told otherwise)
// - Turns every failure into a RequestError (see error.rs for the rules)
// - Tells the ErrorReporter about every error before returning it
//
// The timeout wraps the whole call, sending AND reading the body. When the
// timeout fires, the in-flight future is dropped, which cancels the request.
// Every call gets its own timer, so one slow call never affects another.
//
// Rust concepts:
// - Generics with trait bounds: T: DeserializeOwned means "any type serde
//   can build from JSON"
// - Arc<dyn Trait>: a shared, heap-allocated trait object
// - tokio::time::timeout: races a future against a timer
// =============================================================================

use crate::api::error::RequestError;
use crate::api::reporter::{ErrorReporter, RequestContext, TracingReporter};
use crate::api::retry::RetryPolicy;
use crate::config::ClientConfig;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Method, headers and body for one request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(method: Method, body: &B) -> Result<Self, RequestError> {
        let body = serde_json::to_string(body).map_err(|e| RequestError::unknown(e.to_string()))?;
        Ok(Self {
            method,
            headers: HeaderMap::new(),
            body: Some(body),
        })
    }
}

/// Client for the catalogue API.
///
/// Cheap to clone: the underlying reqwest client and the reporter are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    reporter: Arc<dyn ErrorReporter>,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Builds a client that reports failures through `tracing`.
    pub fn new(config: ClientConfig) -> Self {
        let reporter = Arc::new(TracingReporter::new(config.environment));
        Self::with_reporter(config, reporter)
    }

    pub fn with_reporter(config: ClientConfig, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            // No client-level timeout: each call sets its own
            http: Client::new(),
            config,
            reporter,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the retry policy used for reads
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Sends one request and decodes the JSON response as `T`.
    ///
    /// `timeout` of `None` uses the configured default. Every error is passed
    /// to the reporter before it's returned.
    pub async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
        timeout: Option<Duration>,
    ) -> Result<T, RequestError> {
        let timeout = timeout.unwrap_or(self.config.timeout);

        tracing::debug!(method = %options.method, url, timeout_ms = timeout.as_millis() as u64, "Sending request");

        let headers = outgoing_headers(&options.headers);
        let call = self.execute(url, &options, &headers);
        let result = match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RequestError::timeout()),
        };

        if let Err(error) = &result {
            self.reporter.record(
                error,
                &RequestContext {
                    url,
                    method: &options.method,
                    headers: &headers,
                },
            );
        }

        result
    }

    // Does the actual work; request() wraps it with the timeout and reporting
    async fn execute<T: DeserializeOwned>(
        &self,
        url: &str,
        options: &RequestOptions,
        headers: &HeaderMap,
    ) -> Result<T, RequestError> {
        let mut builder = self
            .http
            .request(options.method.clone(), url)
            .headers(headers.clone());

        if let Some(body) = &options.body {
            builder = builder.body(body.clone());
        }

        let request = builder
            .build()
            .map_err(|e| RequestError::unknown(e.to_string()))?;

        let response = self
            .http
            .execute(request)
            .await
            .map_err(categorize_send_error)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::unknown(e.to_string()))?;

        if !status.is_success() {
            return Err(RequestError::from_response_body(status.as_u16(), &body));
        }

        serde_json::from_slice(&body).map_err(|e| RequestError::unknown(e.to_string()))
    }
}

// The caller's headers as given, repeated values included, plus a JSON
// Content-Type when the caller didn't pick one
fn outgoing_headers(caller: &HeaderMap) -> HeaderMap {
    let mut headers = caller.clone();
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    headers
}

// Errors from sending mean we never got a response
fn categorize_send_error(error: reqwest::Error) -> RequestError {
    if error.is_timeout() {
        RequestError::timeout()
    } else if error.is_builder() {
        RequestError::unknown(error.to_string())
    } else {
        RequestError::network()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why tokio::time::timeout instead of reqwest's own timeout?
//    - It covers the whole call, including reading the body
//    - Each call can pass its own duration
//    - When it fires, the request future is dropped and the connection closed
//
// 2. Why Arc<dyn ErrorReporter>?
//    - The client doesn't care WHO records failures, only that someone does
//    - Tests pass a reporter that remembers every call
//    - Arc makes cloning the client cheap and thread-safe
//
// 3. Why read the body as bytes first?
//    - Error bodies and success bodies are decoded differently
//    - A bad success body and a bad error body end up as different errors
// -----------------------------------------------------------------------------
