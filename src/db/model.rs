use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::slug::slugify;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Database {
    pub ingredients: Vec<Ingredient>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// The document as parsed. Saving lays records out like it.
    #[serde(skip)]
    pub(crate) source: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    pub category: Category,
    #[serde(default)]
    pub what_it_is: String,
    #[serde(default)]
    pub why_used: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_value: Option<String>,
    #[serde(default)]
    pub quality_note: String,
    pub watts_position: Position,
    #[serde(default)]
    pub watts_take: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<Citation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_metadata: Option<SeoMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_it_is_expanded: Option<WhatItIsExpanded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_used_expanded: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_profile: Option<NutritionalProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_considerations: Option<QualityConsiderations>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concerns_expanded: Option<ConcernsExpanded>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_evidence: Option<ScientificEvidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_guidance: Option<LabelGuidance>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faqs: Vec<Faq>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Relationships>,
    /// Fields this schema doesn't model, kept verbatim on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ingredient {
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    pub fn comparisons(&self) -> &[Comparison] {
        self.what_it_is_expanded.as_ref().map_or(&[], |w| w.compare_to_similar.as_slice())
    }

    pub fn has_comparisons(&self) -> bool {
        self.what_it_is_expanded.as_ref().is_some_and(|w| !w.compare_to_similar.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Protein,
    Carbohydrate,
    Fat,
    Fiber,
    Vitamin,
    Mineral,
    Active,
    Preservative,
    Additive,
    Produce,
    Vegetable,
    Other(String),
}

impl Category {
    pub const KNOWN: [Self; 11] = [
        Self::Protein,
        Self::Carbohydrate,
        Self::Fat,
        Self::Fiber,
        Self::Vitamin,
        Self::Mineral,
        Self::Active,
        Self::Preservative,
        Self::Additive,
        Self::Produce,
        Self::Vegetable,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Protein => "protein",
            Self::Carbohydrate => "carbohydrate",
            Self::Fat => "fat",
            Self::Fiber => "fiber",
            Self::Vitamin => "vitamin",
            Self::Mineral => "mineral",
            Self::Active => "active",
            Self::Preservative => "preservative",
            Self::Additive => "additive",
            Self::Produce => "produce",
            Self::Vegetable => "vegetable",
            Self::Other(s) => s,
        }
    }

    /// Categories whose ingredients fill a related-ingredients grid after
    /// the same-category matches run out.
    pub fn neighbours(&self) -> &'static [Self] {
        match self {
            Self::Protein => &[Self::Fat],
            Self::Carbohydrate => &[Self::Fiber],
            Self::Fat => &[Self::Protein],
            Self::Fiber => &[Self::Carbohydrate],
            Self::Vitamin => &[Self::Mineral],
            Self::Mineral => &[Self::Vitamin],
            Self::Active => &[Self::Vitamin, Self::Mineral],
            Self::Preservative => &[Self::Additive],
            Self::Additive => &[Self::Preservative],
            Self::Produce | Self::Vegetable => &[Self::Fiber, Self::Vitamin],
            Self::Other(_) => &[],
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::KNOWN.into_iter().find(|c| c.as_str() == s).unwrap_or(Self::Other(s))
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Good,
    #[default]
    Neutral,
    Caution,
    Avoid,
}

impl Position {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Neutral => "neutral",
            Self::Caution => "caution",
            Self::Avoid => "avoid",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Neutral => "Neutral",
            Self::Caution => "Caution",
            Self::Avoid => "Avoid",
        }
    }

    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Good => "badge-good",
            Self::Neutral => "badge-neutral",
            Self::Caution => "badge-caution",
            Self::Avoid => "badge-avoid",
        }
    }

    /// CSS custom property holding the rating colour.
    pub const fn color_var(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Neutral => "muted",
            Self::Caution => "caution",
            Self::Avoid => "avoid",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatItIsExpanded {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub compare_to_similar: Vec<Comparison>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A "vs." entry. Both halves are optional so incomplete entries load and
/// get reported instead of aborting the whole file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macros: Option<Macros>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub micronutrients: Option<Micronutrients>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amino_acids: Option<AminoAcids>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bioavailability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<String>,
    #[serde(rename = "omega6toOmega3", default, skip_serializing_if = "Option::is_none")]
    pub omega6_to_omega3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fatty_acid_profile: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Micronutrients {
    Text(String),
    Table(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AminoAcids {
    List(Vec<String>),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityConsiderations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub red_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub green_flags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcernsExpanded {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contraindications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_stage_considerations: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScientificEvidence {
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_studies: Vec<Study>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    #[serde(default)]
    pub finding: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_index: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelGuidance {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub how_to_spot: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms_to_know: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_position: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl Faq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into(), priority: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationships {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub often_paired_with: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_blog_posts: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
