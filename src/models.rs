// src/models.rs
// =============================================================================
// Records returned by the remote catalogue API.
//
// Everything here is a read-only copy of remote state: we deserialize it from
// a response body, hand it to the caller, and drop it. The API speaks
// camelCase JSON, so every struct renames its fields accordingly.
// =============================================================================

use serde::{Deserialize, Serialize};

/// Salary range attached to languages and career paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
}

impl SalaryRange {
    /// Midpoint of the range
    pub fn average(&self) -> u64 {
        self.min + (self.max.saturating_sub(self.min)) / 2
    }

    /// Compact display form, e.g. "$85K - $175K"
    pub fn compact(&self) -> String {
        format!("${}K - ${}K", thousands(self.min), thousands(self.max))
    }
}

// Rounds to the nearest thousand, halves rounding up
fn thousands(amount: u64) -> u64 {
    (amount + 500) / 1000
}

/// A programming-language profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRecord {
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub use_cases: Vec<String>,
    #[serde(default)]
    pub advantages: Vec<String>,
    pub salary_range: SalaryRange,
    pub popularity_index: u8,
    pub release_year: u16,
    pub logo_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of a create call: a language without the server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLanguage {
    pub name: String,
    pub description: String,
    pub use_cases: Vec<String>,
    pub advantages: Vec<String>,
    pub salary_range: SalaryRange,
    pub popularity_index: u8,
    pub release_year: u16,
    pub logo_url: String,
}

/// Body of an update call. Only the fields that are set get sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_cases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advantages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<SalaryRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity_index: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// The subset of a language embedded in each career path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSummary {
    pub id: u64,
    pub name: String,
    pub logo_url: String,
    pub popularity_index: u8,
}

/// A career path tied to one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPathRecord {
    pub id: u64,
    pub language_id: u64,
    pub title: String,
    pub description: String,
    pub salary_range: SalaryRange,
    pub experience_required: String,
    pub created_at: String,
    pub language: LanguageSummary,
}

/// Pagination metadata on list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Success envelope: `{success: true, data, pagination?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Body of a delete response, which carries no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
}

/// Either a success envelope or the structured failure.
///
/// Callers have to match on it before they can reach `data`.
pub type RequestOutcome<T> = Result<Envelope<T>, crate::api::RequestError>;

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// A language as the API would send it
    pub fn language_json(id: u64, name: &str, use_cases: &[&str]) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": format!("{} description", name),
            "useCases": use_cases,
            "advantages": ["Fast"],
            "salaryRange": { "min": 85000, "max": 175000, "currency": "USD" },
            "popularityIndex": 90,
            "releaseYear": 2010,
            "logoUrl": format!("/logos/{}.svg", name.to_lowercase()),
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        })
    }

    /// A career path as the API would send it
    pub fn career_path_json(id: u64, title: &str, language_id: u64) -> Value {
        json!({
            "id": id,
            "languageId": language_id,
            "title": title,
            "description": format!("Work as a {}", title),
            "salaryRange": { "min": 90000, "max": 150000, "currency": "USD", "experienceLevel": "mid" },
            "experienceRequired": "2+ years",
            "createdAt": "2024-01-01T00:00:00Z",
            "language": {
                "id": language_id,
                "name": "Rust",
                "logoUrl": "/logos/rust.svg",
                "popularityIndex": 80
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_envelope_with_pagination() {
        let body = json!({
            "success": true,
            "data": [language_json(1, "Python", &["Web Development"])],
            "pagination": { "page": 1, "limit": 10, "total": 1, "totalPages": 1 }
        });

        let envelope: Envelope<Vec<LanguageRecord>> = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].use_cases, vec!["Web Development"]);
        assert_eq!(envelope.pagination.unwrap().total_pages, 1);
    }

    #[test]
    fn test_career_path_keeps_language_summary() {
        let path: CareerPathRecord =
            serde_json::from_value(career_path_json(3, "Backend Engineer", 7)).unwrap();
        assert_eq!(path.language.id, 7);
        assert_eq!(path.salary_range.experience_level.as_deref(), Some("mid"));
    }

    #[test]
    fn test_patch_only_serializes_present_fields() {
        let patch = LanguagePatch {
            popularity_index: Some(95),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "popularityIndex": 95 })
        );
    }

    #[test]
    fn test_salary_formatting() {
        let range = SalaryRange {
            min: 85_000,
            max: 175_000,
            currency: "USD".to_string(),
            experience_level: None,
        };
        assert_eq!(range.compact(), "$85K - $175K");
        assert_eq!(range.average(), 130_000);
    }
}
