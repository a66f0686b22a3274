use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

use super::Database;
use super::model::Category;

/// Schema violations. Any of these stops a load or a save.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("record #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("`{0}` appears more than once")]
    DuplicateName(String),

    #[error("`{name}` lists alias `{alias}` more than once")]
    DuplicateAlias { name: String, alias: String },

    #[error("`{first}` and `{second}` both map to slug `{slug}`")]
    SlugCollision { first: String, second: String, slug: String },

    #[error("`{name}` cites source #{index} but only has {count} citation(s)")]
    CitationOutOfRange { name: String, index: usize, count: usize },

    #[error("no ingredient named `{0}`")]
    UnknownName(String),
}

/// Problems that don't block a save but are worth fixing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    UnknownCategory { name: String, category: String },
    IncompleteComparison { name: String, index: usize },
    UnknownComparison { name: String, slug: String },
    UnknownPairing { name: String, slug: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory { name, category } => {
                write!(f, "`{name}` has unknown category `{category}`")
            }
            Self::IncompleteComparison { name, index } => {
                write!(f, "`{name}` comparison #{index} is missing ingredient or difference")
            }
            Self::UnknownComparison { name, slug } => {
                write!(f, "`{name}` compares to unknown slug `{slug}`")
            }
            Self::UnknownPairing { name, slug } => {
                write!(f, "`{name}` pairs with unknown slug `{slug}`")
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<Warning>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub(super) fn validate(db: &Database) -> Report {
    let mut report = Report::default();
    let mut names = HashSet::new();
    let mut slugs: HashMap<String, &str> = HashMap::new();

    for (index, ing) in db.ingredients.iter().enumerate() {
        if ing.name.trim().is_empty() {
            report.errors.push(ValidationError::EmptyName { index });
            continue;
        }
        if !names.insert(ing.name.as_str()) {
            report.errors.push(ValidationError::DuplicateName(ing.name.clone()));
            continue;
        }
        let slug = ing.slug();
        if let Some(first) = slugs.get(&slug) {
            report.errors.push(ValidationError::SlugCollision {
                first: (*first).to_string(),
                second: ing.name.clone(),
                slug: slug.clone(),
            });
        } else {
            slugs.insert(slug, &ing.name);
        }
    }

    for ing in &db.ingredients {
        let mut seen = HashSet::new();
        for alias in &ing.aliases {
            if !seen.insert(alias) {
                report.errors.push(ValidationError::DuplicateAlias {
                    name: ing.name.clone(),
                    alias: alias.clone(),
                });
            }
        }

        if let Some(evidence) = &ing.scientific_evidence {
            for study in &evidence.key_studies {
                if let Some(index) = study.citation_index
                    && index >= ing.citations.len()
                {
                    report.errors.push(ValidationError::CitationOutOfRange {
                        name: ing.name.clone(),
                        index,
                        count: ing.citations.len(),
                    });
                }
            }
        }

        if let Category::Other(category) = &ing.category {
            report.warnings.push(Warning::UnknownCategory {
                name: ing.name.clone(),
                category: category.clone(),
            });
        }

        for (index, cmp) in ing.comparisons().iter().enumerate() {
            match (&cmp.ingredient, &cmp.difference) {
                (Some(slug), Some(_)) => {
                    if !slugs.contains_key(slug) {
                        report.warnings.push(Warning::UnknownComparison {
                            name: ing.name.clone(),
                            slug: slug.clone(),
                        });
                    }
                }
                _ => report.warnings.push(Warning::IncompleteComparison {
                    name: ing.name.clone(),
                    index,
                }),
            }
        }

        if let Some(rel) = &ing.relationships {
            for slug in &rel.often_paired_with {
                if !slugs.contains_key(slug) {
                    report.warnings.push(Warning::UnknownPairing {
                        name: ing.name.clone(),
                        slug: slug.clone(),
                    });
                }
            }
        }
    }

    report
}
