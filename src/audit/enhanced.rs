//! Progress of the record enrichment work: which pages still lack the
//! comparison block, which records are unfinished, and how to split the
//! remainder into work batches.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::db::{Database, Ingredient};
use crate::walk;

pub const COMPARE_MARKER: &str = "Compare to Similar Ingredients";
pub const DEFAULT_BATCH_SIZE: usize = 8;

/// A comparison entry with a side missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadComparison {
    pub name: String,
    pub index: usize,
    pub ingredient: Option<String>,
    pub difference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStatus {
    pub name: String,
    pub comparisons: usize,
    pub has_profile: bool,
    pub has_seo: bool,
    pub last_updated: Option<String>,
}

impl RecordStatus {
    pub fn of(ingredient: &Ingredient) -> Self {
        Self {
            name: ingredient.name.clone(),
            comparisons: ingredient.comparisons().len(),
            has_profile: ingredient.nutritional_profile.is_some(),
            has_seo: ingredient.seo_metadata.is_some(),
            last_updated: ingredient.last_updated.clone(),
        }
    }
}

/// Page directories whose `index.html` has no comparison block, by name.
pub fn pages_missing_comparisons(dir: &Path) -> Result<Vec<String>> {
    let mut missing = Vec::new();
    for page_dir in walk::page_dirs(dir) {
        let path = page_dir.join("index.html");
        let html = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if !html.contains(COMPARE_MARKER) {
            missing.push(walk::file_name(&page_dir));
        }
    }
    missing.sort();
    Ok(missing)
}

pub fn records_missing_comparisons(db: &Database) -> Vec<&str> {
    db.ingredients.iter().filter(|i| !i.has_comparisons()).map(|i| i.name.as_str()).collect()
}

pub fn bad_comparisons(db: &Database) -> Vec<BadComparison> {
    let blank = |s: &Option<String>| s.as_deref().is_none_or(|s| s.trim().is_empty());

    db.ingredients
        .iter()
        .flat_map(|ing| {
            ing.comparisons().iter().enumerate().filter_map(|(index, c)| {
                (blank(&c.ingredient) || blank(&c.difference)).then(|| BadComparison {
                    name: ing.name.clone(),
                    index,
                    ingredient: c.ingredient.clone(),
                    difference: c.difference.clone(),
                })
            })
        })
        .collect()
}

/// Records not yet flagged `enhanced: true`.
pub fn unenhanced(db: &Database) -> Vec<&Ingredient> {
    db.ingredients.iter().filter(|i| i.enhanced != Some(true)).collect()
}

/// Consecutive chunks of `size`; a zero size is treated as one.
pub fn batches<T: Clone>(list: &[T], size: usize) -> Vec<Vec<T>> {
    list.chunks(size.max(1)).map(<[T]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_keep_remainder() {
        let list: Vec<u32> = (0..19).collect();
        let chunks = batches(&list, 8);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], vec![16, 17, 18]);
    }

    #[test]
    fn test_zero_batch_size() {
        assert_eq!(batches(&[1, 2], 0), vec![vec![1], vec![2]]);
    }
}
