//! `<div>` balance in blog posts, with a closer look at callout and
//! quick-facts boxes that swallow the rest of the page.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::walk;

/// A box closing later than this is suspicious.
const SUSPICIOUS_SPAN: usize = 100;
/// Still open after this many lines is certainly broken.
const UNCLOSED_SPAN: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DivReport {
    pub opens: usize,
    pub closes: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl DivReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

fn depth_change(line: &str) -> isize {
    line.matches("<div").count() as isize - line.matches("</div>").count() as isize
}

fn box_warnings(html: &str) -> Vec<String> {
    let lines: Vec<&str> = html.split('\n').collect();
    let mut warnings = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        if !line.contains(r#"class="callout""#) && !line.contains(r#"class="quick-facts""#) {
            continue;
        }
        let kind = if line.contains("callout") { "callout" } else { "quick-facts" };
        let start = idx + 1;
        let mut depth = 0isize;

        for (offset, check) in lines[idx..].iter().enumerate() {
            let number = start + offset;
            depth += depth_change(check);

            if depth == 0 && number > start {
                let span = number - start;
                if span > SUSPICIOUS_SPAN {
                    warnings.push(format!(
                        "Line {start}: {kind} section took {span} lines to close (suspicious)"
                    ));
                }
                break;
            }
            if number - start > UNCLOSED_SPAN && depth > 0 {
                warnings.push(format!(
                    "Line {start}: {kind} section still unclosed after 200+ lines!"
                ));
                break;
            }
        }
    }
    warnings
}

pub fn check(html: &str) -> DivReport {
    let opens = html.matches("<div").count();
    let closes = html.matches("</div>").count();
    let mut errors = Vec::new();
    if opens != closes {
        errors.push(format!(
            "Div imbalance: {opens} opens, {closes} closes (diff: {})",
            opens as isize - closes as isize
        ));
    }
    DivReport { opens, closes, errors, warnings: box_warnings(html) }
}

/// Every post in `dir` with its report, clean ones included.
pub fn check_posts(dir: &Path) -> Result<Vec<(String, DivReport)>> {
    walk::blog_posts(dir)
        .into_iter()
        .map(|path| {
            let html = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok((walk::file_name(&path), check(&html)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_page_is_clean() {
        let html = "<div class=\"callout\">\n<p>x</p>\n</div>\n";
        assert!(check(html).is_clean());
    }

    #[test]
    fn test_imbalance_is_an_error() {
        let report = check("<div><div></div>");
        assert_eq!(report.errors, vec!["Div imbalance: 2 opens, 1 closes (diff: 1)"]);
    }

    #[test]
    fn test_unclosed_callout_warns() {
        let mut html = String::from("<div class=\"callout\">\n");
        html.push_str(&"<p>text</p>\n".repeat(250));
        let report = check(&html);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("still unclosed"));
    }
}
