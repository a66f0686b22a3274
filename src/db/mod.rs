//! The ingredients database: one JSON file, loaded whole, edited in memory,
//! rewritten whole.

mod layout;
mod model;
mod validate;

pub use model::{
    AminoAcids, Category, Citation, Comparison, ConcernsExpanded, Database, Faq, Ingredient,
    LabelGuidance, Macros, Micronutrients, NutritionalProfile, Position, QualityConsiderations,
    Relationships, ScientificEvidence, SeoMetadata, Study, WhatItIsExpanded,
};
pub use validate::{Report, ValidationError, Warning};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::{debug, log};

impl Database {
    /// Parse without validating. Malformed JSON is an error.
    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("malformed database {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let source: Value = serde_json::from_str(content)?;
        let mut db: Self = serde_json::from_value(source.clone())?;
        db.source = Some(source);
        Ok(db)
    }

    /// Read and validate. Errors abort, warnings are logged.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Self::read(path)?;
        let report = db.validate();
        for warning in &report.warnings {
            log!("warn"; "{warning}");
        }
        if !report.is_ok() {
            for err in &report.errors {
                log!("error"; "{err}");
            }
            bail!(
                "{} has {} schema error(s); run `larder validate --fix` or edit by hand",
                path.display(),
                report.errors.len()
            );
        }
        debug!("db"; "loaded {} ingredients from {}", db.ingredients.len(), path.display());
        Ok(db)
    }

    /// Pretty JSON laid out like the parsed file: key order, untouched
    /// empty lists and top-level keys around `ingredients` survive.
    pub fn to_json(&self) -> Result<String> {
        let mut root = Map::new();
        root.insert("ingredients".to_string(), serde_json::to_value(&self.ingredients)?);
        root.extend(self.extra.clone());
        let mut value = Value::Object(root);
        if let Some(source) = &self.source {
            value = layout::follow(value, source);
        }
        let mut out = serde_json::to_string_pretty(&value)?;
        out.push('\n');
        Ok(out)
    }

    /// Validate, then overwrite `path` with the whole database.
    pub fn save(&self, path: &Path) -> Result<()> {
        let report = self.validate();
        if let Some(err) = report.errors.first() {
            bail!("refusing to save {}: {err}", path.display());
        }
        fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn find(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Ingredient> {
        self.ingredients.iter_mut().find(|i| i.name == name)
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.slug() == slug)
    }

    /// Append the aliases the record doesn't have yet and return them.
    pub fn add_aliases(
        &mut self,
        name: &str,
        aliases: &[String],
    ) -> Result<Vec<String>, ValidationError> {
        let ing =
            self.find_mut(name).ok_or_else(|| ValidationError::UnknownName(name.to_string()))?;
        let mut added = Vec::new();
        for alias in aliases {
            if !ing.aliases.contains(alias) {
                ing.aliases.push(alias.clone());
                added.push(alias.clone());
            }
        }
        Ok(added)
    }

    /// Drop the listed aliases and return the ones that were present.
    pub fn remove_aliases(
        &mut self,
        name: &str,
        aliases: &[String],
    ) -> Result<Vec<String>, ValidationError> {
        let ing =
            self.find_mut(name).ok_or_else(|| ValidationError::UnknownName(name.to_string()))?;
        let mut removed = Vec::new();
        for alias in aliases {
            if let Some(pos) = ing.aliases.iter().position(|a| a == alias) {
                removed.push(ing.aliases.remove(pos));
            }
        }
        Ok(removed)
    }

    /// Insert before the first record whose name sorts after this one.
    /// Returns the position used.
    pub fn insert_sorted(&mut self, ingredient: Ingredient) -> Result<usize, ValidationError> {
        if self.find(&ingredient.name).is_some() {
            return Err(ValidationError::DuplicateName(ingredient.name));
        }
        let index = self
            .ingredients
            .iter()
            .position(|i| i.name.as_str() > ingredient.name.as_str())
            .unwrap_or(self.ingredients.len());
        self.ingredients.insert(index, ingredient);
        Ok(index)
    }

    pub fn remove(&mut self, name: &str) -> Option<Ingredient> {
        let index = self.ingredients.iter().position(|i| i.name == name)?;
        Some(self.ingredients.remove(index))
    }

    pub fn validate(&self) -> Report {
        validate::validate(self)
    }

    /// Keep the first copy of every alias. Returns how many were dropped.
    pub fn dedupe_aliases(&mut self) -> usize {
        let mut dropped = 0;
        for ing in &mut self.ingredients {
            let before = ing.aliases.len();
            let mut seen = std::collections::HashSet::new();
            ing.aliases.retain(|a| seen.insert(a.clone()));
            dropped += before - ing.aliases.len();
        }
        dropped
    }
}
