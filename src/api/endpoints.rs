// src/api/endpoints.rs
// =============================================================================
// The catalogue API's operations, built on ApiClient::request.
//
// Reads (list/get) are wrapped in the retry policy.
// Writes (create/update/delete) are sent exactly once.
//
// Query parameters are only added when the caller gave them a value; a zero
// page or an empty search string counts as "not given".
// =============================================================================

use crate::api::client::{ApiClient, RequestOptions};
use crate::api::error::RequestError;
use crate::api::retry::retry_request;
use crate::models::{
    Acknowledgement, CareerPathRecord, Envelope, LanguagePatch, LanguageRecord, NewLanguage,
    RequestOutcome,
};
use clap::ValueEnum;
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

/// How many languages we fetch at once for a comparison
const FETCH_CONCURRENCY: usize = 3;

/// How many of the most popular languages a name lookup searches
const NAME_LOOKUP_LIMIT: u32 = 100;

/// How a single language is identified on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageKey {
    Id(u64),
    Name(String),
}

impl LanguageKey {
    /// A positive integer is an id; anything else (including "0") is a name.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(id) if id > 0 => LanguageKey::Id(id),
            _ => LanguageKey::Name(raw.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filters for listing languages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl LanguageQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_number(&mut pairs, "page", self.page.map(u64::from));
        push_number(&mut pairs, "limit", self.limit.map(u64::from));
        push_text(&mut pairs, "search", self.search.as_deref());
        push_text(&mut pairs, "sort", self.sort.as_deref());
        push_text(&mut pairs, "order", self.order.as_ref().map(SortOrder::as_str));
        pairs
    }
}

/// Filters for listing career paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareerPathQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub language_id: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl CareerPathQuery {
    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_number(&mut pairs, "page", self.page.map(u64::from));
        push_number(&mut pairs, "limit", self.limit.map(u64::from));
        push_number(&mut pairs, "languageId", self.language_id);
        push_text(&mut pairs, "sort", self.sort.as_deref());
        push_text(&mut pairs, "order", self.order.as_ref().map(SortOrder::as_str));
        pairs
    }
}

fn push_number(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<u64>) {
    if let Some(value) = value.filter(|v| *v != 0) {
        pairs.push((key, value.to_string()));
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value.to_string()));
    }
}

// Appends the query string, or leaves the URL alone when there's nothing to add
fn with_query(base: String, pairs: &[(&'static str, String)]) -> Result<String, RequestError> {
    if pairs.is_empty() {
        return Ok(base);
    }

    let mut url = Url::parse(&base).map_err(|e| RequestError::unknown(e.to_string()))?;
    url.query_pairs_mut()
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    Ok(url.to_string())
}

impl ApiClient {
    // GET with the client's retry policy
    async fn get_with_retry<T: DeserializeOwned>(&self, url: &str) -> Result<T, RequestError> {
        let policy = self.retry_policy();
        retry_request(
            || self.request::<T>(url, RequestOptions::get(), None),
            policy.max_retries,
            policy.base_delay,
        )
        .await
    }

    /// GET /languages
    pub async fn list_languages(
        &self,
        query: &LanguageQuery,
    ) -> RequestOutcome<Vec<LanguageRecord>> {
        let url = with_query(self.config().endpoint("languages"), &query.pairs())?;
        self.get_with_retry(&url).await
    }

    /// GET /languages/{id}
    pub async fn get_language(&self, id: u64) -> RequestOutcome<LanguageRecord> {
        let url = self.config().endpoint(&format!("languages/{}", id));
        self.get_with_retry(&url).await
    }

    /// Finds a language by name, ignoring case.
    ///
    /// Searches the most popular languages with one (retried) list call. A
    /// name that isn't among them is a 404 NotFound.
    pub async fn find_language_by_name(&self, name: &str) -> RequestOutcome<LanguageRecord> {
        let query = LanguageQuery {
            limit: Some(NAME_LOOKUP_LIMIT),
            sort: Some("popularityIndex".to_string()),
            order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let wanted = name.to_lowercase();
        let listing = self.list_languages(&query).await?;

        match listing
            .data
            .into_iter()
            .find(|language| language.name.to_lowercase() == wanted)
        {
            Some(language) => Ok(Envelope {
                success: true,
                data: language,
                pagination: None,
            }),
            None => {
                tracing::debug!(language = name, "No language with this name");
                Err(RequestError::new(
                    404,
                    "NotFound",
                    format!("Language '{}' not found", name),
                    None,
                ))
            }
        }
    }

    /// Looks a language up by id or by name
    pub async fn lookup_language(&self, key: &LanguageKey) -> RequestOutcome<LanguageRecord> {
        match key {
            LanguageKey::Id(id) => self.get_language(*id).await,
            LanguageKey::Name(name) => self.find_language_by_name(name).await,
        }
    }

    /// Fetches several languages concurrently, keeping the order of `ids`.
    ///
    /// Stops at the first failure.
    pub async fn fetch_languages(&self, ids: &[u64]) -> Result<Vec<LanguageRecord>, RequestError> {
        stream::iter(ids.iter().copied())
            .map(|id| async move { self.get_language(id).await.map(|envelope| envelope.data) })
            .buffered(FETCH_CONCURRENCY)
            .try_collect()
            .await
    }

    /// POST /languages, sent once
    pub async fn create_language(
        &self,
        language: &NewLanguage,
    ) -> RequestOutcome<LanguageRecord> {
        let url = self.config().endpoint("languages");
        let options = RequestOptions::json(Method::POST, language)?;
        self.request(&url, options, None).await
    }

    /// PUT /languages/{id}, sent once
    pub async fn update_language(
        &self,
        id: u64,
        patch: &LanguagePatch,
    ) -> RequestOutcome<LanguageRecord> {
        let url = self.config().endpoint(&format!("languages/{}", id));
        let options = RequestOptions::json(Method::PUT, patch)?;
        self.request(&url, options, None).await
    }

    /// DELETE /languages/{id}, sent once
    pub async fn delete_language(&self, id: u64) -> Result<Acknowledgement, RequestError> {
        let url = self.config().endpoint(&format!("languages/{}", id));
        self.request(&url, RequestOptions::delete(), None).await
    }

    /// GET /career-paths
    pub async fn list_career_paths(
        &self,
        query: &CareerPathQuery,
    ) -> RequestOutcome<Vec<CareerPathRecord>> {
        let url = with_query(self.config().endpoint("career-paths"), &query.pairs())?;
        self.get_with_retry(&url).await
    }
}
