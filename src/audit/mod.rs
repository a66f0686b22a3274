//! Read-only content audits. Each produces a serializable report that
//! later fix commands read back.

pub mod divs;
pub mod enhanced;
pub mod inline;
pub mod links;
pub mod related;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Below this many contextual links a page or post is flagged.
pub const MIN_LINKS: usize = 3;

pub fn save_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

pub fn load_report<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("malformed report {}", path.display()))
}

/// Whole percent of `part` in `total`, 0 for an empty total.
pub fn percent(part: usize, total: usize) -> usize {
    if total == 0 { 0 } else { (part * 100 + total / 2) / total }
}
