use std::path::{Path, PathBuf};

use anyhow::Result;
use larder::audit::{self, links::LinksReport};
use larder::config::Site;
use larder::linker::{self, LinkRule, Linked};
use larder::transform::{self, Batch};
use larder::{debug, log, walk};

const LINKS_REPORT: &str = "ingredient-links-audit.json";

fn rules_or(
    path: Option<&Path>,
    site: &Site,
    default: fn() -> Vec<LinkRule>,
) -> Result<Vec<LinkRule>> {
    match path {
        Some(p) => linker::load_rules(&site.resolve(p)),
        None => Ok(default()),
    }
}

/// Run `link` over each file. A result with a nested anchor is discarded.
fn link_files(files: &[PathBuf], module: &str, link: impl Fn(&str) -> Linked) -> Result<Batch> {
    let mut batch = Batch::default();
    for path in files {
        let mut added = Vec::new();
        let outcome = transform::apply(path, |html| {
            let linked = link(html);
            if linker::has_nested_anchor(&linked.html) && !linker::has_nested_anchor(html) {
                log!("warn"; "{}: linking would nest anchors, left unchanged", path.display());
                return html.to_string();
            }
            added = linked.added;
            linked.html
        })?;
        if added.is_empty() {
            debug!(module; "{}: nothing to link", path.display());
        } else {
            log!(module; "{}: {}", walk::file_name(path), added.join(", "));
        }
        batch.record(path, outcome);
    }
    Ok(batch)
}

/// Ingredient pages, limited to those the links audit flagged when its
/// report is present.
pub fn pages(site: &Site, report: Option<&Path>, rules: Option<&Path>, max: usize) -> Result<()> {
    let rules = rules_or(rules, site, linker::default_page_rules)?;
    let dir = site.ingredients_dir();

    let report_path = report.map_or_else(|| site.report(LINKS_REPORT), |p| site.resolve(p));
    let files: Vec<PathBuf> = if report_path.exists() {
        let report: LinksReport = audit::load_report(&report_path)?;
        log!("link"; "{} page(s) flagged in {}", report.needing_more().count(), report_path.display());
        report.needing_more().map(|p| dir.join(&p.dir).join("index.html")).collect()
    } else {
        walk::page_dirs(&dir).into_iter().map(|d| d.join("index.html")).collect()
    };

    let batch = link_files(&files, "link", |html| linker::link_page(html, &rules, max))?;
    batch.print_summary("done");
    Ok(())
}

pub fn blog(site: &Site, rules: Option<&Path>) -> Result<()> {
    let rules = rules_or(rules, site, linker::default_blog_rules)?;
    let files = walk::blog_posts(&site.blog_dir());
    let batch = link_files(&files, "link", |html| linker::link_blog(html, &rules))?;
    batch.print_summary("done");
    Ok(())
}
