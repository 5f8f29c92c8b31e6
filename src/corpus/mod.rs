//! Sonnet corpus: PoetryDB download with a local JSON cache.
//!
//! The corpus is loaded once at startup. A present cache file wins over the
//! network; a missing cache triggers one PoetryDB fetch whose response is
//! written back pretty-printed, so later runs start offline.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

/// PoetryDB endpoint returning all of Shakespeare's sonnets.
pub const POETRYDB_URL: &str = "https://poetrydb.org/author,title/Shakespeare;Sonnet";

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// One sonnet as served by PoetryDB. Immutable after load; extra response
/// fields (author, linecount) are dropped at deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sonnet {
    pub title: String,
    pub lines: Vec<String>,
}

/// Where a loaded corpus came from, for the startup report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusSource {
    Cache,
    Network,
}

/// Load the corpus, preferring the local cache over the network.
pub fn load_sonnets(cache_path: &Path) -> Result<(Vec<Sonnet>, CorpusSource)> {
    if cache_path.exists() {
        let raw = fs::read_to_string(cache_path)
            .with_context(|| format!("failed to read cache file {}", cache_path.display()))?;
        let sonnets: Vec<Sonnet> = serde_json::from_str(&raw).with_context(|| {
            format!("corrupt cache file (invalid JSON): {}", cache_path.display())
        })?;
        debug!(count = sonnets.len(), cache = %cache_path.display(), "loaded corpus from cache");
        return Ok((sonnets, CorpusSource::Cache));
    }

    let body = fetch_sonnets_from_api()?;
    let sonnets: Vec<Sonnet> =
        serde_json::from_value(body.clone()).context("unexpected PoetryDB response shape")?;

    // Pretty-printed rather than the raw body byte for byte; the cache
    // doubles as a human-readable corpus dump.
    let pretty = serde_json::to_string_pretty(&body).context("failed to serialize corpus cache")?;
    fs::write(cache_path, pretty)
        .with_context(|| format!("failed to write cache file {}", cache_path.display()))?;

    info!(count = sonnets.len(), cache = %cache_path.display(), "downloaded corpus from PoetryDB");
    Ok((sonnets, CorpusSource::Network))
}

fn fetch_sonnets_from_api() -> Result<serde_json::Value> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    client
        .get(POETRYDB_URL)
        .send()
        .context("PoetryDB request failed")?
        .error_for_status()
        .context("PoetryDB returned an error status")?
        .json()
        .context("failed to decode PoetryDB response")
}
