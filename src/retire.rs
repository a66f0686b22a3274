//! Taking an ingredient's page off the site once its record is gone.

use std::fs;

use anyhow::{Context, Result};

use crate::config::Site;
use crate::render::INGREDIENTS_PATH;
use crate::sitemap::{self, Sitemap};
use crate::transform::{self, Outcome};
use crate::walk;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Retired {
    /// `<url>` blocks dropped from the sitemap.
    pub sitemap_entries: usize,
    pub card_removed: bool,
    /// Pages whose links now point at the redirect target.
    pub redirected: usize,
    pub purged: bool,
}

/// Drop the directory card linking to `slug` and the indentation before it.
pub fn remove_card(html: &str, slug: &str) -> String {
    let open = format!(r#"<a href="{INGREDIENTS_PATH}{slug}/" class="ingredient-card""#);
    let Some(start) = html.find(&open) else {
        return html.to_string();
    };
    let Some(len) = html[start..].find("</a>") else {
        return html.to_string();
    };
    let end = start + len + "</a>".len();
    let start = html[..start].trim_end().len();
    format!("{}{}", &html[..start], &html[end..])
}

/// Point every link to the `from` page at the `to` page.
pub fn retarget_links(html: &str, from: &str, to: &str) -> String {
    html.replace(
        &format!(r#"href="{INGREDIENTS_PATH}{from}/""#),
        &format!(r#"href="{INGREDIENTS_PATH}{to}/""#),
    )
}

/// Remove the sitemap entry and directory card for `slug`. With
/// `redirect`, links on the other ingredient pages move to that slug. With
/// `purge`, the page directory is deleted.
pub fn retire(site: &Site, slug: &str, redirect: Option<&str>, purge: bool) -> Result<Retired> {
    let mut retired = Retired::default();

    let sitemap_path = site.sitemap();
    if sitemap_path.exists() {
        let mut map = Sitemap::read(&sitemap_path)?;
        let loc = sitemap::ingredient_loc(&site.config.site.base_url, slug);
        retired.sitemap_entries = map.remove_loc(&loc);
        if retired.sitemap_entries > 0 {
            map.write(&sitemap_path)?;
        }
    }

    retired.card_removed = transform::apply(&site.directory_page(), |html| remove_card(html, slug))?
        == Outcome::Changed;

    if let Some(target) = redirect {
        for page_dir in walk::page_dirs(&site.ingredients_dir()) {
            if walk::file_name(&page_dir) == slug {
                continue;
            }
            let page = page_dir.join("index.html");
            if transform::apply(&page, |html| retarget_links(html, slug, target))?
                == Outcome::Changed
            {
                retired.redirected += 1;
            }
        }
    }

    let page_dir = site.ingredients_dir().join(slug);
    if purge && page_dir.exists() {
        fs::remove_dir_all(&page_dir)
            .with_context(|| format!("failed to delete {}", page_dir.display()))?;
        retired.purged = true;
    }

    Ok(retired)
}
