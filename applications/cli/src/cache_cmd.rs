//! `encore cache ...`

use anyhow::Context;
use clap::Subcommand;
use encore_cache::ReadThroughCache;
use serde_json::Value;

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Print a cached payload
    Get {
        category: String,
        id: String,
        /// Query parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
    },
    /// Cache a JSON payload
    Set {
        category: String,
        id: String,
        /// Payload as JSON
        payload: String,
        /// Query parameters as a JSON object
        #[arg(long)]
        params: Option<String>,
    },
    /// Remove one entry
    Invalidate {
        category: String,
        id: String,
        #[arg(long)]
        params: Option<String>,
    },
    /// Remove every entry of a category
    InvalidateType { category: String },
    /// Remove everything except one key
    Clear {
        /// Key to keep (raw store key or `category:id`)
        #[arg(long)]
        preserve: Option<String>,
    },
    /// Print live entry counts
    Stats,
    /// Drop expired entries now
    Purge,
}

/// Execute one action and render its output
pub fn run(cache: &ReadThroughCache, action: CacheAction) -> anyhow::Result<String> {
    let output = match action {
        CacheAction::Get {
            category,
            id,
            params,
        } => {
            let params = parse_params(params.as_deref())?;
            match cache.get(&category, &id, params.as_ref()) {
                Some(payload) => serde_json::to_string_pretty(&payload)?,
                None => "(absent)".to_string(),
            }
        }
        CacheAction::Set {
            category,
            id,
            payload,
            params,
        } => {
            let payload: Value =
                serde_json::from_str(&payload).context("Payload is not valid JSON")?;
            let params = parse_params(params.as_deref())?;
            cache.set(&category, &id, payload, params.as_ref());
            format!("Cached {}:{}", category, id)
        }
        CacheAction::Invalidate {
            category,
            id,
            params,
        } => {
            let params = parse_params(params.as_deref())?;
            cache.invalidate(&category, &id, params.as_ref());
            format!("Invalidated {}:{}", category, id)
        }
        CacheAction::InvalidateType { category } => {
            cache.invalidate_type(&category);
            format!("Invalidated category {}", category)
        }
        CacheAction::Clear { preserve } => {
            cache.clear_all(preserve.as_deref());
            match preserve {
                Some(key) => format!("Cleared cache (kept {})", key),
                None => "Cleared cache".to_string(),
            }
        }
        CacheAction::Stats => serde_json::to_string_pretty(&cache.get_stats())?,
        CacheAction::Purge => format!("Purged {} expired entries", cache.purge_expired()),
    };

    Ok(output)
}

fn parse_params(raw: Option<&str>) -> anyhow::Result<Option<Value>> {
    raw.map(|raw| serde_json::from_str(raw).context("Params are not valid JSON"))
        .transpose()
}
