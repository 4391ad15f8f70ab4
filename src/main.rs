// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) and build the client configuration once
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = success, 1 = the API request failed, 2 = error)
//
// Rust concepts used:
// - async/await: Every API call is a network request
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

mod api;           // src/api/ - HTTP client, retries, typed errors
mod catalog;       // src/catalog/ - categories, grouping, comparisons
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - client configuration
mod models;        // src/models.rs - records returned by the API
mod output;        // src/output.rs - tables and JSON

use anyhow::{anyhow, Context, Result};
use api::{ApiClient, CareerPathQuery, LanguageKey, LanguageQuery, RequestError, RetryPolicy};
use catalog::{ComparisonSelection, ComparisonTable, Toggle, MAX_COMPARED, MIN_COMPARED};
use clap::Parser;
use cli::{Cli, Commands};
use config::ClientConfig;
use models::{LanguagePatch, NewLanguage};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => match e.downcast_ref::<RequestError>() {
            // The API answered with (or we synthesized) a structured failure
            Some(request_error) => {
                output::print_request_error(request_error);
                1
            }
            None => {
                eprintln!("Error: {:#}", e);
                2
            }
        },
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so they never mix with table or JSON output.
// RUST_LOG wins over --verbose when it's set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let config = ClientConfig::new(&cli.api_url, cli.timeout_ms, cli.environment)?;
    let client = ApiClient::new(config).with_retry_policy(RetryPolicy::new(
        cli.retries,
        Duration::from_millis(cli.retry_delay_ms),
    ));

    match cli.command {
        Commands::Languages {
            page,
            limit,
            search,
            sort,
            order,
            category,
            json,
        } => {
            let query = LanguageQuery {
                page,
                limit,
                search,
                sort,
                order,
            };
            let envelope = client.list_languages(&query).await?;

            let languages: Vec<_> = match category {
                Some(category) => catalog::filter_by_category(&envelope.data, category),
                None => envelope.data.iter().collect(),
            };
            output::print_languages(&languages, envelope.pagination.as_ref(), json)?;
        }
        Commands::Language { key, json } => {
            let envelope = client.lookup_language(&LanguageKey::parse(&key)).await?;
            output::print_language(&envelope.data, json)?;
        }
        Commands::CareerPaths {
            page,
            limit,
            language_id,
            sort,
            order,
            grouped,
            json,
        } => {
            let query = CareerPathQuery {
                page,
                limit,
                language_id,
                sort,
                order,
            };
            let envelope = client.list_career_paths(&query).await?;

            if grouped {
                let groups = catalog::group_career_paths(&envelope.data);
                output::print_career_groups(&groups, json)?;
            } else {
                output::print_career_paths(&envelope.data, envelope.pagination.as_ref(), json)?;
            }
        }
        Commands::Compare { ids, json } => {
            let selection = select_for_comparison(&ids)?;
            let languages = client.fetch_languages(selection.ids()).await?;
            output::print_comparison(&ComparisonTable::build(&languages), json)?;
        }
        Commands::Create { data } => {
            let language: NewLanguage = serde_json::from_str(&read_payload(&data).await?)
                .context("Invalid language JSON")?;
            let envelope = client.create_language(&language).await?;
            println!("✅ Created {} (id {})", envelope.data.name, envelope.data.id);
        }
        Commands::Update { id, data } => {
            let patch: LanguagePatch = serde_json::from_str(&read_payload(&data).await?)
                .context("Invalid update JSON")?;
            let envelope = client.update_language(id, &patch).await?;
            println!("✅ Updated {} (id {})", envelope.data.name, envelope.data.id);
        }
        Commands::Delete { id } => {
            client.delete_language(id).await?;
            println!("🗑️  Deleted language {}", id);
        }
    }

    Ok(0)
}

// Builds the comparison selection from the ids on the command line
fn select_for_comparison(ids: &[u64]) -> Result<ComparisonSelection> {
    let mut selection = ComparisonSelection::new();

    for &id in ids {
        if !selection.can_select(id) {
            return Err(anyhow!(
                "You can compare at most {} languages at a time",
                MAX_COMPARED
            ));
        }

        match selection.toggle(id) {
            Toggle::Added => {}
            Toggle::Removed => return Err(anyhow!("Language {} is listed more than once", id)),
            Toggle::Full => return Err(anyhow!("Comparison is already full")),
        }
    }

    if !selection.is_ready() {
        return Err(anyhow!(
            "Select at least {} languages to compare",
            MIN_COMPARED
        ));
    }

    Ok(selection)
}

// "--data" is either inline JSON or @path to a file
async fn read_payload(data: &str) -> Result<String> {
    match data.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Could not read {}", path)),
        None => Ok(data.to_string()),
    }
}
