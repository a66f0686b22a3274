use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use larder::config::Site;
use larder::db::{Database, Ingredient, ValidationError};
use larder::{log, retire};
use serde::Deserialize;

/// A record, a list of records, or a whole database file.
#[derive(Deserialize)]
#[serde(untagged)]
enum NewRecords {
    Database(Database),
    Many(Vec<Ingredient>),
    One(Box<Ingredient>),
}

impl NewRecords {
    fn into_vec(self) -> Vec<Ingredient> {
        match self {
            Self::Database(db) => db.ingredients,
            Self::Many(list) => list,
            Self::One(ing) => vec![*ing],
        }
    }
}

pub fn add(site: &Site, file: &Path) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let records: NewRecords = serde_json::from_str(&content)
        .with_context(|| format!("malformed ingredient file {}", file.display()))?;

    let path = site.database();
    let mut db = Database::open(&path)?;
    let mut inserted = Vec::new();

    for ing in records.into_vec() {
        let name = ing.name.clone();
        match db.insert_sorted(ing) {
            Ok(index) => {
                log!("ingredient"; "inserted {name} at position {index}");
                inserted.push(name);
            }
            Err(ValidationError::DuplicateName(name)) => {
                log!("warn"; "{name} already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }

    if inserted.is_empty() {
        log!("ingredient"; "nothing to add");
        return Ok(());
    }
    db.save(&path)?;
    log!("done"; "added {} ingredient(s); run `larder generate` and `larder directory` next", inserted.len());
    Ok(())
}

/// Drop the record, its sitemap entry and its directory card. With
/// `redirect`, links to the old page across every ingredient page point at
/// the new slug. With `purge`, the page directory is deleted.
pub fn remove(site: &Site, name: &str, redirect: Option<&str>, purge: bool) -> Result<()> {
    let path = site.database();
    let mut db = Database::open(&path)?;
    let Some(removed) = db.remove(name) else {
        bail!("no ingredient named `{name}`");
    };
    db.save(&path)?;
    let slug = removed.slug();
    log!("ingredient"; "removed {name} from {}", path.display());

    let retired = retire::retire(site, &slug, redirect, purge)?;
    match retired.sitemap_entries {
        0 => log!("sitemap"; "{slug} not listed"),
        n => log!("sitemap"; "removed {n} entry for {slug}"),
    }
    if retired.card_removed {
        log!("directory"; "removed card for {slug}");
    }
    if let Some(target) = redirect {
        log!("ingredient"; "pointed links in {} page(s) at {target}", retired.redirected);
    }

    let page_dir = site.ingredients_dir().join(&slug);
    if retired.purged {
        log!("ingredient"; "deleted {}", page_dir.display());
    } else if page_dir.exists() {
        log!("ingredient"; "page left in place at {}; pass --purge to delete it", page_dir.display());
    }

    log!("done"; "{name} removed");
    Ok(())
}
