//! Contextual links on ingredient pages.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::html::{element_inner, h1_text, section};
use crate::walk;

use super::MIN_LINKS;

/// Body sections that count, by id and by heading text for pages
/// generated before ids existed.
const CONTENT_SECTIONS: [(&str, &str); 4] = [
    ("what-it-is", "What It Is"),
    ("why-used", "Why It's Used"),
    ("scientific-evidence", "Scientific Evidence"),
    ("concerns", "Potential Concerns"),
];

/// The comparison list links other ingredients by construction and does
/// not count as contextual.
const COMPARE_HEADING: &str = "<h3>Compare to Similar Ingredients";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_pages: usize,
    pub pages_with_links: usize,
    pub pages_with_enough_links: usize,
    pub pages_needing_links: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    pub dir: String,
    pub title: String,
    pub blog_links: usize,
    pub ingredient_links: usize,
    pub total_contextual_links: usize,
    pub needs_more: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksReport {
    pub summary: Summary,
    pub pages: Vec<PageLinks>,
}

impl LinksReport {
    pub fn needing_more(&self) -> impl Iterator<Item = &PageLinks> {
        self.pages.iter().filter(|p| p.needs_more)
    }
}

/// Text of the counted sections of `main`, concatenated.
fn contextual_text(main: &str) -> String {
    let mut text = String::new();
    for (id, heading) in CONTENT_SECTIONS {
        let Some(range) = section(main, id).or_else(|| section(main, heading)) else {
            continue;
        };
        let body = &main[range];
        let body = body.find(COMPARE_HEADING).map_or(body, |i| &body[..i]);
        text.push_str(body);
    }
    text
}

/// `None` for a page without `<main>`.
pub fn audit_page(dir: &str, html: &str) -> Option<PageLinks> {
    let main = element_inner(html, "main")?;
    let text = contextual_text(main);

    let blog = Regex::new(r#"<a href="/blog/[^"]+\.html"[^>]*>"#).expect("static pattern");
    let ingredient = Regex::new(r#"<a href="/ingredient-analyzer/ingredients/[^"]+/"[^>]*>"#)
        .expect("static pattern");
    let blog_links = blog.find_iter(&text).count();
    let ingredient_links = ingredient.find_iter(&text).count();
    let total = blog_links + ingredient_links;

    Some(PageLinks {
        dir: dir.to_string(),
        title: h1_text(html).unwrap_or_else(|| dir.to_string()),
        blog_links,
        ingredient_links,
        total_contextual_links: total,
        needs_more: total < MIN_LINKS,
    })
}

/// Every `<dir>/<slug>/index.html`, fewest links first.
pub fn audit_pages(dir: &Path) -> Result<LinksReport> {
    let mut report = LinksReport::default();

    for page_dir in walk::page_dirs(dir) {
        let path = page_dir.join("index.html");
        let html = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        report.summary.total_pages += 1;

        let Some(page) = audit_page(&walk::file_name(&page_dir), &html) else {
            continue;
        };
        if page.total_contextual_links > 0 {
            report.summary.pages_with_links += 1;
        }
        if page.needs_more {
            report.summary.pages_needing_links += 1;
        }
        report.pages.push(page);
    }

    report.summary.pages_with_enough_links =
        report.summary.total_pages - report.summary.pages_needing_links;
    report.pages.sort_by_key(|p| p.total_contextual_links);
    Ok(report)
}
