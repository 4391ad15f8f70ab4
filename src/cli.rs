// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI is described by plain structs and enums
// and clap generates the parsing code. Global flags (API URL, timeout,
// environment) also read LANGSCOPE_* environment variables, so a shell or CI
// job can configure the client once.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use crate::api::SortOrder;
use crate::catalog::LanguageCategory;
use crate::config::{Environment, DEFAULT_API_URL, DEFAULT_TIMEOUT_MS};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "langscope",
    version,
    about = "Browse programming languages, salaries and career paths from the catalogue API",
    long_about = "langscope talks to the catalogue API to list languages, show their salary ranges \
                  and career paths, and compare up to three languages side by side."
)]
pub struct Cli {
    /// Base URL of the catalogue API
    #[arg(long, global = true, env = "LANGSCOPE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true, env = "LANGSCOPE_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Runtime environment; production sends failures to the error_tracking log target
    #[arg(
        long = "env",
        global = true,
        env = "LANGSCOPE_ENV",
        value_enum,
        default_value_t = Environment::Development
    )]
    pub environment: Environment,

    /// Attempts for read requests (list/get), including the first one
    #[arg(long, global = true, default_value_t = 3)]
    pub retries: u32,

    /// Delay before the first retry; doubles on each further retry
    #[arg(long, global = true, default_value_t = 1000)]
    pub retry_delay_ms: u64,

    /// Log every request to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List languages
    ///
    /// Example: langscope languages --limit 10 --sort popularityIndex --order desc
    Languages {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,

        /// Free-text search on the server
        #[arg(long)]
        search: Option<String>,

        /// Field to sort by, e.g. popularityIndex or releaseYear
        #[arg(long)]
        sort: Option<String>,

        #[arg(long, value_enum)]
        order: Option<SortOrder>,

        /// Only show languages whose use cases fall in this category
        #[arg(long, value_enum)]
        category: Option<LanguageCategory>,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one language in detail, looked up by id or by name
    ///
    /// Example: langscope language 3
    /// Example: langscope language rust
    Language {
        /// A positive id, or a language name (case doesn't matter)
        #[arg(value_name = "ID|NAME")]
        key: String,

        #[arg(long)]
        json: bool,
    },

    /// List career paths
    ///
    /// Example: langscope career-paths --language-id 3 --grouped
    CareerPaths {
        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        limit: Option<u32>,

        /// Only career paths for this language
        #[arg(long)]
        language_id: Option<u64>,

        #[arg(long)]
        sort: Option<String>,

        #[arg(long, value_enum)]
        order: Option<SortOrder>,

        /// Group by career category instead of a flat list
        #[arg(long)]
        grouped: bool,

        #[arg(long)]
        json: bool,
    },

    /// Compare two or three languages side by side
    ///
    /// Example: langscope compare 1 2 5
    Compare {
        #[arg(required = true, num_args = 2..)]
        ids: Vec<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Create a language (sent once, never retried)
    ///
    /// Example: langscope create --data @zig.json
    Create {
        /// JSON body, or @path to read it from a file
        #[arg(long)]
        data: String,
    },

    /// Update fields of a language (sent once, never retried)
    ///
    /// Example: langscope update 3 --data '{"popularityIndex": 95}'
    Update {
        id: u64,

        /// JSON body with the fields to change, or @path
        #[arg(long)]
        data: String,
    },

    /// Delete a language (sent once, never retried)
    Delete { id: u64 },
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `global = true` do?
//    - The flag can be written before or after the subcommand
//    - `langscope --verbose languages` and `langscope languages --verbose` both work
//
// 2. What does `env = "..."` do?
//    - If the flag isn't given, clap reads the environment variable instead
//    - Needs clap's "env" feature (see Cargo.toml)
//
// 3. Why Option<u32> for page and limit?
//    - None means "don't send it", so the server uses its own default
// -----------------------------------------------------------------------------
