use std::path::Path;

use anyhow::Result;
use larder::audit::{self, related::{self, RelatedReport}};
use larder::config::Site;
use larder::transform::{self, Batch, Outcome};
use larder::log;

const RELATED_REPORT: &str = "related-articles-audit.json";

/// Rebuild flagged blocks and add suggested ones to posts without. Reads
/// the related audit report, or audits on the spot when there is none.
pub fn fix(site: &Site, report: Option<&Path>, suggestions: Option<&Path>) -> Result<()> {
    let report_path = report.map_or_else(|| site.report(RELATED_REPORT), |p| site.resolve(p));
    let report: RelatedReport = if report_path.exists() {
        audit::load_report(&report_path)?
    } else {
        log!("related"; "no report at {}, auditing now", report_path.display());
        related::audit_posts(&site.blog_dir())?
    };
    let suggestions = match suggestions {
        Some(p) => related::load_suggestions(&site.resolve(p))?,
        None => related::default_suggestions(),
    };

    let dir = site.blog_dir();
    let mut batch = Batch::default();
    let files = report.format_issues.iter().map(|i| &i.file).chain(&report.missing_related);

    for file in files {
        let path = dir.join(file);
        let picks = suggestions.get(file.as_str()).map(Vec::as_slice);
        let outcome = transform::apply(&path, |html| {
            related::fix_post(html, picks).unwrap_or_else(|| html.to_string())
        })?;
        match outcome {
            Outcome::Changed => log!("related"; "fixed {file}"),
            Outcome::Unchanged => log!("related"; "{file}: no changes made"),
            Outcome::Missing => {}
        }
        batch.record(&path, outcome);
    }

    batch.print_summary("done");
    Ok(())
}
