//! IndexNow submission: one POST with the whole URL list.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("nothing to submit")]
    Empty,

    #[error("IndexNow rejected the submission (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("request to IndexNow failed")]
    Transport(#[from] ureq::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub host: String,
    pub key: String,
    pub key_location: String,
    pub url_list: Vec<String>,
}

impl Submission {
    /// Repeated URLs are dropped, first occurrence wins.
    pub fn new(host: &str, key: &str, key_location: &str, urls: &[String]) -> Self {
        let mut url_list: Vec<String> = Vec::with_capacity(urls.len());
        for url in urls {
            if !url_list.contains(url) {
                url_list.push(url.clone());
            }
        }
        Self {
            host: host.to_string(),
            key: key.to_string(),
            key_location: key_location.to_string(),
            url_list,
        }
    }

    /// Key file served from the site root, as IndexNow expects.
    pub fn for_site(base_url: &str, host: &str, key: &str, urls: &[String]) -> Self {
        let location = format!("{}/{key}.txt", base_url.trim_end_matches('/'));
        Self::new(host, key, &location, urls)
    }
}

/// 8 to 128 characters of `[A-Za-z0-9-]`.
pub fn is_valid_key(key: &str) -> bool {
    (8..=128).contains(&key.len()) && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Trimmed content of `path`, which must be named `<key>.txt`.
pub fn read_key(path: &Path) -> Result<String> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let key = content.trim();
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    if stem != key {
        bail!("key file {} must be named after the key it holds", path.display());
    }
    if !is_valid_key(key) {
        bail!("{} does not hold a valid IndexNow key", path.display());
    }
    Ok(key.to_string())
}

/// First `*.txt` in `root` whose name matches its content.
pub fn find_key_file(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.path().extension().is_some_and(|x| x == "txt"))
        .map(walkdir::DirEntry::into_path)
        .find(|p| read_key(p).is_ok())
}

/// 200 and 202 are success. Anything else comes back as `Rejected` with
/// the response body.
pub fn submit(endpoint: &str, submission: &Submission) -> Result<u16, SubmitError> {
    if submission.url_list.is_empty() {
        return Err(SubmitError::Empty);
    }

    let agent = ureq::Agent::new_with_config(
        ureq::config::Config::builder().http_status_as_error(false).build(),
    );

    let mut response = agent
        .post(endpoint)
        .header("Content-Type", "application/json; charset=utf-8")
        .send_json(submission)?;

    let status = response.status().as_u16();
    if status == 200 || status == 202 {
        return Ok(status);
    }
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Err(SubmitError::Rejected { status, body })
}
