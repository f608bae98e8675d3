//! ytmsearch CLI - search YouTube Music and print the results as JSON
//!
//! The binary is meant to be driven by another process: it prints exactly one
//! line of JSON on stdout and keeps every diagnostic on stderr.

pub mod config;

use std::io::Write;

use anyhow::anyhow;
use tracing::info;
use ytmsearch_core::MusicSearch;

pub use config::{is_usage_error, Config, FilterKind, USAGE};

/// Runs one search and writes the result value to `out` as a single JSON line.
///
/// The value returned by `searcher` is written as-is. Search failures are
/// returned with their user-facing message and nothing is written.
pub async fn run<S, W>(searcher: &S, query: &str, limit: i64, out: &mut W) -> anyhow::Result<()>
where
    S: MusicSearch,
    W: Write,
{
    info!("Searching for: '{}' (limit: {})", query, limit);

    let results = searcher
        .search(query, limit)
        .await
        .map_err(|e| anyhow!(e.user_message()))?;

    let json = serde_json::to_string(&results)?;
    writeln!(out, "{}", json)?;
    out.flush()?;

    Ok(())
}
