// src/catalog/category.rs
// =============================================================================
// Sorting fetched records into browsing categories.
//
// Languages are tagged by keywords in their use cases. A language can land in
// several categories (JavaScript is both web and mobile).
//
// Career paths are grouped by keywords in their title. Each path goes into
// exactly one group: the first rule that matches wins, and anything left over
// is Data Engineering.
// =============================================================================

use crate::models::{CareerPathRecord, LanguageRecord, SalaryRange};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LanguageCategory {
    Web,
    Mobile,
    Data,
    Systems,
}

impl LanguageCategory {
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            LanguageCategory::Web => &["web"],
            LanguageCategory::Mobile => &["mobile"],
            LanguageCategory::Data => &["data science", "machine learning", "big data"],
            LanguageCategory::Systems => &["system", "embedded", "operating"],
        }
    }

    /// True if any of the language's use cases mentions this category
    pub fn matches(&self, language: &LanguageRecord) -> bool {
        language.use_cases.iter().any(|use_case| {
            let use_case = use_case.to_lowercase();
            self.keywords().iter().any(|keyword| use_case.contains(keyword))
        })
    }
}

/// Languages in `category`, in their original order
pub fn filter_by_category(
    languages: &[LanguageRecord],
    category: LanguageCategory,
) -> Vec<&LanguageRecord> {
    languages
        .iter()
        .filter(|language| category.matches(language))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CareerCategory {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "AI & Machine Learning")]
    AiMachineLearning,
    #[serde(rename = "Systems & Infrastructure")]
    SystemsInfrastructure,
    #[serde(rename = "Game Development")]
    GameDevelopment,
    #[serde(rename = "Data Engineering")]
    DataEngineering,
}

// Checked in this order; the first hit decides
const CAREER_RULES: &[(CareerCategory, &[&str])] = &[
    (CareerCategory::WebDevelopment, &["frontend", "backend", "full", "web"]),
    (CareerCategory::MobileDevelopment, &["mobile", "ios", "android"]),
    (CareerCategory::AiMachineLearning, &["data", "machine", "ai", "ml"]),
    (CareerCategory::SystemsInfrastructure, &["system", "devops", "infrastructure"]),
    (CareerCategory::GameDevelopment, &["game", "unity"]),
];

impl CareerCategory {
    pub fn for_title(title: &str) -> Self {
        let title = title.to_lowercase();
        CAREER_RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|keyword| title.contains(keyword)))
            .map(|(category, _)| *category)
            .unwrap_or(CareerCategory::DataEngineering)
    }

    pub fn title(&self) -> &'static str {
        match self {
            CareerCategory::WebDevelopment => "Web Development",
            CareerCategory::MobileDevelopment => "Mobile Development",
            CareerCategory::AiMachineLearning => "AI & Machine Learning",
            CareerCategory::SystemsInfrastructure => "Systems & Infrastructure",
            CareerCategory::GameDevelopment => "Game Development",
            CareerCategory::DataEngineering => "Data Engineering",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CareerCategory::WebDevelopment => "Build modern web applications and services",
            CareerCategory::MobileDevelopment => "Create native and cross-platform mobile apps",
            CareerCategory::AiMachineLearning => "Develop intelligent systems and data solutions",
            CareerCategory::SystemsInfrastructure => "Build high-performance systems and tools",
            CareerCategory::GameDevelopment => "Create interactive gaming experiences",
            CareerCategory::DataEngineering => "Design and maintain data pipelines",
        }
    }
}

/// One category and the career paths that fell into it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerGroup<'a> {
    pub category: CareerCategory,
    pub paths: Vec<&'a CareerPathRecord>,
    /// Lowest minimum to highest maximum across the group's paths
    pub salary_range: SalaryRange,
}

impl<'a> CareerGroup<'a> {
    fn new(category: CareerCategory, path: &'a CareerPathRecord) -> Self {
        Self {
            category,
            paths: vec![path],
            salary_range: SalaryRange {
                experience_level: None,
                ..path.salary_range.clone()
            },
        }
    }

    fn push(&mut self, path: &'a CareerPathRecord) {
        self.salary_range.min = self.salary_range.min.min(path.salary_range.min);
        self.salary_range.max = self.salary_range.max.max(path.salary_range.max);
        self.paths.push(path);
    }
}

/// Groups career paths by title.
///
/// Groups appear in the order their first path appears; paths keep their
/// input order inside a group.
pub fn group_career_paths(paths: &[CareerPathRecord]) -> Vec<CareerGroup<'_>> {
    let mut groups: Vec<CareerGroup<'_>> = Vec::new();

    for path in paths {
        let category = CareerCategory::for_title(&path.title);
        match groups.iter_mut().find(|group| group.category == category) {
            Some(group) => group.push(path),
            None => groups.push(CareerGroup::new(category, path)),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{career_path_json, language_json};

    fn language(id: u64, use_cases: &[&str]) -> LanguageRecord {
        serde_json::from_value(language_json(id, "Lang", use_cases)).unwrap()
    }

    fn career(id: u64, title: &str) -> CareerPathRecord {
        serde_json::from_value(career_path_json(id, title, 1)).unwrap()
    }

    fn paid(id: u64, title: &str, min: u64, max: u64) -> CareerPathRecord {
        let mut path = career(id, title);
        path.salary_range.min = min;
        path.salary_range.max = max;
        path
    }

    #[test]
    fn test_language_categories_match_case_insensitively() {
        let js = language(1, &["Frontend Web Development", "Mobile Apps (React Native)"]);
        assert!(LanguageCategory::Web.matches(&js));
        assert!(LanguageCategory::Mobile.matches(&js));
        assert!(!LanguageCategory::Data.matches(&js));

        let c = language(2, &["Operating Systems", "Embedded firmware"]);
        assert!(LanguageCategory::Systems.matches(&c));

        let python = language(3, &["Machine Learning & AI Development"]);
        assert!(LanguageCategory::Data.matches(&python));
    }

    #[test]
    fn test_filter_keeps_order() {
        let languages = vec![
            language(1, &["Web"]),
            language(2, &["Games"]),
            language(3, &["web services"]),
        ];
        let ids: Vec<_> = filter_by_category(&languages, LanguageCategory::Web)
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_career_titles_first_rule_wins() {
        assert_eq!(CareerCategory::for_title("Backend Engineer"), CareerCategory::WebDevelopment);
        assert_eq!(CareerCategory::for_title("iOS Developer"), CareerCategory::MobileDevelopment);
        // "data" comes before "system" in the rules
        assert_eq!(
            CareerCategory::for_title("Data Systems Engineer"),
            CareerCategory::AiMachineLearning
        );
        assert_eq!(CareerCategory::for_title("DevOps Engineer"), CareerCategory::SystemsInfrastructure);
        assert_eq!(CareerCategory::for_title("Unity Programmer"), CareerCategory::GameDevelopment);
        assert_eq!(CareerCategory::for_title("Technical Writer"), CareerCategory::DataEngineering);
    }

    #[test]
    fn test_grouping_preserves_first_appearance() {
        let paths = vec![
            career(1, "DevOps Engineer"),
            career(2, "Frontend Developer"),
            career(3, "Site Reliability Infrastructure Lead"),
            career(4, "Game Designer"),
        ];

        let groups = group_career_paths(&paths);
        let summary: Vec<_> = groups
            .iter()
            .map(|g| (g.category, g.paths.iter().map(|p| p.id).collect::<Vec<_>>()))
            .collect();

        assert_eq!(
            summary,
            vec![
                (CareerCategory::SystemsInfrastructure, vec![1, 3]),
                (CareerCategory::WebDevelopment, vec![2]),
                (CareerCategory::GameDevelopment, vec![4]),
            ]
        );
    }

    #[test]
    fn test_group_salary_spans_its_paths() {
        let paths = vec![
            paid(1, "Frontend Developer", 75_000, 130_000),
            paid(2, "DevOps Engineer", 95_000, 160_000),
            paid(3, "Backend Developer", 85_000, 175_000),
        ];

        let groups = group_career_paths(&paths);
        let web = &groups[0];
        assert_eq!(web.category, CareerCategory::WebDevelopment);
        assert_eq!((web.salary_range.min, web.salary_range.max), (75_000, 175_000));
        assert_eq!(web.salary_range.compact(), "$75K - $175K");
        assert_eq!(web.salary_range.currency, "USD");
        assert!(web.salary_range.experience_level.is_none());

        // A single path's range is its own
        let systems = &groups[1];
        assert_eq!((systems.salary_range.min, systems.salary_range.max), (95_000, 160_000));
    }
}
