//! Inline links in blog posts, outside the Related Articles block.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::html::{element_inner, h1_text, hrefs_with_prefix};
use crate::render::INGREDIENTS_PATH;
use crate::walk;

use super::MIN_LINKS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostLinks {
    pub file: String,
    pub title: String,
    pub blog_links: usize,
    pub ingredient_links: usize,
    pub total_inline_links: usize,
    pub needs_more: bool,
    pub links_list: Vec<String>,
}

/// `None` when the post has no `<article>`.
pub fn audit_post(file: &str, html: &str) -> Option<PostLinks> {
    let article = element_inner(html, "article")?;
    let body = article.split("Related Articles").next().unwrap_or(article);

    let blog: BTreeSet<&str> = hrefs_with_prefix(body, "/blog/")
        .into_iter()
        .filter(|href| href.ends_with(".html"))
        .collect();
    let ingredients: BTreeSet<&str> =
        hrefs_with_prefix(body, INGREDIENTS_PATH).into_iter().collect();
    let total = blog.len() + ingredients.len();

    Some(PostLinks {
        file: file.to_string(),
        title: h1_text(html).unwrap_or_else(|| file.to_string()),
        blog_links: blog.len(),
        ingredient_links: ingredients.len(),
        total_inline_links: total,
        needs_more: total < MIN_LINKS,
        links_list: blog.into_iter().map(str::to_string).collect(),
    })
}

/// Every post in `dir`, fewest links first.
pub fn audit_posts(dir: &Path) -> Result<Vec<PostLinks>> {
    let mut posts = Vec::new();
    for path in walk::blog_posts(dir) {
        let html = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        if let Some(post) = audit_post(&walk::file_name(&path), &html) {
            posts.push(post);
        }
    }
    posts.sort_by_key(|p| p.total_inline_links);
    Ok(posts)
}
