// src/output.rs
// =============================================================================
// Printing results, either as human-readable tables or as JSON.
//
// Every print_* function takes a `json` flag. JSON output is the raw records
// (pretty-printed) so it can be piped into other tools; the table form is for
// reading in a terminal.
// =============================================================================

use crate::api::RequestError;
use crate::catalog::{CareerGroup, ComparisonTable};
use crate::models::{CareerPathRecord, LanguageRecord, Pagination};
use anyhow::Result;
use serde::Serialize;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Shortens text to `max` characters, adding "..." when it was cut
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

pub fn print_languages(
    languages: &[&LanguageRecord],
    pagination: Option<&Pagination>,
    json: bool,
) -> Result<()> {
    if json {
        return print_json(languages);
    }

    if languages.is_empty() {
        println!("No languages found");
        return Ok(());
    }

    println!(
        "{:<6} {:<20} {:<12} {:<8} {:<18}",
        "ID", "NAME", "POPULARITY", "SINCE", "SALARY"
    );
    println!("{}", "=".repeat(68));

    for language in languages {
        println!(
            "{:<6} {:<20} {:<12} {:<8} {:<18}",
            language.id,
            truncate(&language.name, 20),
            format!("{}/100", language.popularity_index),
            language.release_year,
            language.salary_range.compact(),
        );
    }

    println!();
    print_pagination(pagination, languages.len());
    Ok(())
}

fn print_pagination(pagination: Option<&Pagination>, shown: usize) {
    match pagination {
        Some(p) => println!(
            "📋 Page {} of {} ({} total, {} shown)",
            p.page, p.total_pages, p.total, shown
        ),
        None => println!("📋 Total: {}", shown),
    }
}

pub fn print_language(language: &LanguageRecord, json: bool) -> Result<()> {
    if json {
        return print_json(language);
    }

    println!("{} (since {})", language.name, language.release_year);
    println!("{}", "=".repeat(language.name.chars().count() + 13));
    println!("{}", language.description);
    println!();
    println!("⭐ Popularity: {}/100", language.popularity_index);

    let salary = &language.salary_range;
    match &salary.experience_level {
        Some(level) => println!(
            "💰 Salary: {} {} ({} level)",
            salary.compact(),
            salary.currency,
            level
        ),
        None => println!("💰 Salary: {} {}", salary.compact(), salary.currency),
    }

    if !language.use_cases.is_empty() {
        println!("\nUse cases:");
        for use_case in &language.use_cases {
            println!("   • {}", use_case);
        }
    }

    if !language.advantages.is_empty() {
        println!("\nAdvantages:");
        for advantage in &language.advantages {
            println!("   • {}", advantage);
        }
    }

    Ok(())
}

pub fn print_career_paths(
    paths: &[CareerPathRecord],
    pagination: Option<&Pagination>,
    json: bool,
) -> Result<()> {
    if json {
        return print_json(paths);
    }

    if paths.is_empty() {
        println!("No career paths found");
        return Ok(());
    }

    print_career_table(paths.iter());
    println!();
    print_pagination(pagination, paths.len());
    Ok(())
}

fn print_career_table<'a>(paths: impl Iterator<Item = &'a CareerPathRecord>) {
    println!(
        "{:<6} {:<32} {:<14} {:<18} {:<12}",
        "ID", "TITLE", "LANGUAGE", "SALARY", "EXPERIENCE"
    );
    println!("{}", "=".repeat(86));

    for path in paths {
        println!(
            "{:<6} {:<32} {:<14} {:<18} {:<12}",
            path.id,
            truncate(&path.title, 32),
            truncate(&path.language.name, 14),
            path.salary_range.compact(),
            path.experience_required,
        );
    }
}

pub fn print_career_groups(groups: &[CareerGroup<'_>], json: bool) -> Result<()> {
    if json {
        return print_json(groups);
    }

    for group in groups {
        println!(
            "\n📂 {} ({}): {}",
            group.category.title(),
            group.paths.len(),
            group.category.description()
        );
        println!("   💰 {}", group.salary_range.compact());
        print_career_table(group.paths.iter().copied());
    }

    Ok(())
}

pub fn print_comparison(table: &ComparisonTable, json: bool) -> Result<()> {
    if json {
        return print_json(table);
    }

    print!("{:<16}", "");
    for name in &table.languages {
        print!(" {:<24}", truncate(name, 24));
    }
    println!();
    println!("{}", "=".repeat(16 + 25 * table.languages.len()));

    for row in &table.rows {
        print!("{:<16}", row.attribute);
        for value in &row.values {
            print!(" {:<24}", truncate(value, 24));
        }
        println!();
    }

    Ok(())
}

/// Explains a failed request on stderr
pub fn print_request_error(error: &RequestError) {
    eprintln!("❌ {}", error.message);

    if error.is_network_error() {
        eprintln!("   Is the API running? Set --api-url or LANGSCOPE_API_URL.");
    } else {
        eprintln!("   {} [{}]: {}", error.status_code, error.kind, error.status_message());
    }

    if error.is_auth_error() {
        eprintln!("   The API refused our credentials.");
    } else if error.is_rate_limited() || error.is_timeout() {
        eprintln!("   Wait a moment and try again, or raise --retries.");
    }

    for line in error.validation_messages() {
        eprintln!("   - {}", line);
    }
}
