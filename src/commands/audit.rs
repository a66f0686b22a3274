use anyhow::{Result, bail};
use larder::audit::{self, divs, enhanced, inline, links, related};
use larder::config::Site;
use larder::db::Database;
use larder::log;

use super::rule;

pub fn links(site: &Site) -> Result<()> {
    let report = links::audit_pages(&site.ingredients_dir())?;
    let s = &report.summary;

    println!("{:<40} {:>5} {:>6} {:>6}", "Page", "Blog", "Ingr.", "Total");
    println!("{}", rule(60));
    for page in report.needing_more() {
        println!(
            "{:<40} {:>5} {:>6} {:>6}",
            page.dir, page.blog_links, page.ingredient_links, page.total_contextual_links
        );
    }
    println!("{}", rule(60));
    println!(
        "{} pages | {} with links | {} with {}+ ({}%) | {} need more",
        s.total_pages,
        s.pages_with_links,
        s.pages_with_enough_links,
        audit::MIN_LINKS,
        audit::percent(s.pages_with_enough_links, s.total_pages),
        s.pages_needing_links
    );

    let path = site.report("ingredient-links-audit.json");
    audit::save_report(&path, &report)?;
    log!("done"; "report saved to {}", path.display());
    Ok(())
}

pub fn inline(site: &Site) -> Result<()> {
    let posts = inline::audit_posts(&site.blog_dir())?;
    let needing: Vec<_> = posts.iter().filter(|p| p.needs_more).collect();

    println!("{:<50} {:>5} {:>6} {:>6}", "Post", "Blog", "Ingr.", "Total");
    println!("{}", rule(70));
    for post in &needing {
        println!(
            "{:<50} {:>5} {:>6} {:>6}",
            post.file, post.blog_links, post.ingredient_links, post.total_inline_links
        );
    }
    println!("{}", rule(70));
    println!(
        "{} posts | {} with {}+ inline links | {} need more",
        posts.len(),
        posts.len() - needing.len(),
        audit::MIN_LINKS,
        needing.len()
    );

    let path = site.report("inline-links-audit.json");
    audit::save_report(&path, &posts)?;
    log!("done"; "report saved to {}", path.display());
    Ok(())
}

pub fn related(site: &Site) -> Result<()> {
    let report = related::audit_posts(&site.blog_dir())?;

    for issue in &report.format_issues {
        println!("{}", issue.file);
        for line in &issue.issues {
            println!("  - {line}");
        }
    }
    if !report.missing_related.is_empty() {
        println!();
        println!("Without Related Articles:");
        for file in &report.missing_related {
            println!("  - {file}");
        }
    }
    println!("{}", rule(60));
    println!(
        "{} posts | {} with Related Articles ({}%) | {} without | {} with format issues",
        report.total,
        report.has_related,
        audit::percent(report.has_related, report.total),
        report.no_related,
        report.format_issues.len()
    );

    let path = site.report("related-articles-audit.json");
    audit::save_report(&path, &report)?;
    log!("done"; "report saved to {}", path.display());
    Ok(())
}

/// Fails when any post has unbalanced divs.
pub fn divs(site: &Site) -> Result<()> {
    let results = divs::check_posts(&site.blog_dir())?;
    let mut errors = 0usize;
    let mut warnings = 0usize;

    for (file, report) in &results {
        if !report.errors.is_empty() {
            errors += 1;
            log!("error"; "{file}");
            for e in &report.errors {
                println!("  {e}");
            }
        } else if !report.warnings.is_empty() {
            warnings += 1;
            log!("warn"; "{file}");
            for w in &report.warnings {
                println!("  {w}");
            }
        }
    }

    println!("{}", rule(60));
    println!(
        "{} clean | {warnings} with warnings | {errors} with errors",
        results.len() - errors - warnings
    );
    if errors > 0 {
        bail!("{errors} post(s) have unbalanced divs");
    }
    log!("done"; "all posts have balanced divs");
    Ok(())
}

/// Pages still without a comparison block, split into work batches, and
/// the records not yet marked enhanced.
pub fn enhanced(site: &Site, batch_size: usize) -> Result<()> {
    let missing = enhanced::pages_missing_comparisons(&site.ingredients_dir())?;
    println!("{} page(s) without comparisons", missing.len());
    for (n, batch) in enhanced::batches(&missing, batch_size).iter().enumerate() {
        println!("Batch {}: {}", n + 1, batch.join(", "));
    }

    let db = Database::open(&site.database())?;
    let pending = enhanced::unenhanced(&db);
    println!();
    println!("{:<36} {:>6} {:>8} {:>4} {:>12}", "Record", "Comps", "Profile", "SEO", "Updated");
    println!("{}", rule(70));
    for ing in &pending {
        let status = enhanced::RecordStatus::of(ing);
        println!(
            "{:<36} {:>6} {:>8} {:>4} {:>12}",
            status.name,
            status.comparisons,
            if status.has_profile { "yes" } else { "-" },
            if status.has_seo { "yes" } else { "-" },
            status.last_updated.as_deref().unwrap_or("-")
        );
    }
    println!("{}", rule(70));
    println!("{} of {} record(s) not enhanced", pending.len(), db.ingredients.len());
    Ok(())
}

pub fn comparisons(site: &Site) -> Result<()> {
    let db = Database::read(&site.database())?;

    let missing = enhanced::records_missing_comparisons(&db);
    println!("Missing compareToSimilar ({}):", missing.len());
    println!("{}", missing.join(", "));

    let bad = enhanced::bad_comparisons(&db);
    println!();
    if bad.is_empty() {
        log!("done"; "no incomplete comparison entries");
        return Ok(());
    }
    for b in &bad {
        log!("warn"; "{} comparison {}: ingredient {:?}, difference {:?}", b.name, b.index, b.ingredient, b.difference);
    }
    println!(
        "{} incomplete comparison entr{}",
        bad.len(),
        if bad.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}
