// src/catalog/mod.rs
// =============================================================================
// Client-side logic over fetched records.
//
// Submodules:
// - category: use-case categories for languages, title groups for careers
// - compare: the three-slot comparison selection and its table
//
// None of this talks to the network; it only reshapes what the API returned.
// =============================================================================

mod category;
mod compare;

pub use category::{
    filter_by_category, group_career_paths, CareerCategory, CareerGroup, LanguageCategory,
};
pub use compare::{ComparisonSelection, ComparisonTable, Toggle, MAX_COMPARED, MIN_COMPARED};
