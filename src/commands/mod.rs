pub mod aliases;
pub mod audit;
pub mod dates;
pub mod directory;
pub mod faqs;
pub mod generate;
pub mod indexnow;
pub mod ingredient;
pub mod init;
pub mod link;
pub mod patch;
pub mod related;
pub mod sitemap;
pub mod validate;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Separator line under table headers.
fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// `root`-relative display of `path`, or the path itself.
fn relative<'a>(root: &Path, path: &'a Path) -> std::borrow::Cow<'a, str> {
    path.strip_prefix(root).unwrap_or(path).to_string_lossy()
}

fn write_if_missing(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(true)
}
