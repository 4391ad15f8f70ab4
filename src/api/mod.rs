// src/api/mod.rs
// =============================================================================
// This module talks to the remote catalogue API.
//
// Submodules:
// - client: sends one request with a timeout and classifies failures
// - retry: exponential-backoff retry for reads
// - error: the RequestError type every call returns
// - reporter: where failures are recorded (tracing by default)
// - endpoints: languages and career-paths operations
//
// What the rest of the app needs is re-exported here, so it can write
// `api::ApiClient` instead of `api::client::ApiClient`.
// =============================================================================

mod client;
mod endpoints;
mod error;
mod reporter;
mod retry;

pub use client::ApiClient;
pub use endpoints::{CareerPathQuery, LanguageKey, LanguageQuery, SortOrder};
pub use error::RequestError;
pub use retry::RetryPolicy;
