//! HTML generation for ingredient pages and the encyclopedia index.

pub mod chrome;
pub mod directory;
pub mod faq;
pub mod page;
pub mod related;
pub mod schema;
pub mod sections;
pub mod title;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::config::Site;
use crate::db::Database;
use crate::{debug, log};

pub const ANALYZER_PATH: &str = "/ingredient-analyzer/";
pub const INGREDIENTS_PATH: &str = "/ingredient-analyzer/ingredients/";

#[derive(Debug, Default)]
pub struct Generated {
    pub pages: Vec<PathBuf>,
    /// Set only on full runs.
    pub slug_map: Option<PathBuf>,
}

/// Write `<ingredients_dir>/<slug>/index.html` for every record, or only
/// the one whose slug equals `filter`.
pub fn generate_pages(db: &Database, site: &Site, filter: Option<&str>) -> Result<Generated> {
    let filter = filter.map(str::to_lowercase);
    let selected: Vec<_> = db
        .ingredients
        .iter()
        .filter(|i| filter.as_deref().is_none_or(|f| i.slug() == f))
        .collect();

    if let Some(f) = &filter
        && selected.is_empty()
    {
        bail!("ingredient `{f}` not found in database");
    }

    let out_dir = site.ingredients_dir();
    let mut generated = Generated::default();
    let mut slug_map = Map::new();

    for (n, ing) in selected.iter().enumerate() {
        let slug = ing.slug();
        let dir = out_dir.join(&slug);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join("index.html");
        let html = page::render(ing, &db.ingredients, &site.config);
        fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
        debug!("generate"; "{}", path.display());

        slug_map.insert(ing.name.clone(), Value::String(slug));
        generated.pages.push(path);
        if (n + 1) % 20 == 0 {
            log!("generate"; "{} pages...", n + 1);
        }
    }

    if filter.is_none() {
        let path = site.slug_map();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut json = serde_json::to_string_pretty(&slug_map)?;
        json.push('\n');
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        generated.slug_map = Some(path);
    }

    Ok(generated)
}

pub fn generate_directory(db: &Database, site: &Site) -> Result<PathBuf> {
    let path = site.directory_page();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, directory::render(db, &site.config))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
