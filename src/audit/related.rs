//! The Related Articles block at the end of blog posts: format audit and
//! the standard rebuild.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::html::escape;
use crate::walk;

const HEADING: &str = "Related Articles";
const FAQ_HEADING: &str = "<h2>Frequently Asked Questions</h2>";
const MAX_CARDS: usize = 4;

/// Style fragments the standard block carries, with the issue reported
/// when one is missing.
const STYLE_CHECKS: [(&str, &str); 8] = [
    ("margin-top: 56px", "H2 missing margin-top: 56px"),
    ("padding-top: 40px", "H2 missing padding-top: 40px"),
    ("border-top: 2px solid", "H2 missing border-top"),
    ("display: grid", "Missing grid container"),
    ("padding: 16px 20px", "Cards missing correct padding (16px 20px)"),
    ("border: 3px solid var(--brand-orange)", "Cards missing orange border"),
    ("border-radius: 12px", "Cards missing border-radius"),
    ("margin: 0 0 8px 0", "Card h3 missing correct margin (0 0 8px 0)"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub url: String,
    pub title: String,
    pub description: String,
}

impl Suggestion {
    pub fn new(url: &str, title: &str, description: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatIssue {
    pub file: String,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedReport {
    pub total: usize,
    pub has_related: usize,
    pub no_related: usize,
    pub format_issues: Vec<FormatIssue>,
    pub missing_related: Vec<String>,
}

/// One card, already HTML.
struct Card {
    url: String,
    title: String,
    description: String,
}

/// The heading through to the next `<h2` or `</main>`.
fn section_range(html: &str) -> Option<Range<usize>> {
    let heading = Regex::new(r"<h2[^>]*>Related Articles</h2>").expect("static pattern");
    let found = heading.find(html)?;
    let rest = &html[found.end()..];
    let end = [rest.find("<h2"), rest.find("</main>")]
        .into_iter()
        .flatten()
        .min()
        .map_or(html.len(), |i| found.end() + i);
    Some(found.start()..end)
}

/// Issues in one Related Articles block; empty when it matches the
/// standard.
pub fn check_section(section: &str) -> Vec<String> {
    let mut issues = Vec::new();
    if !section.contains("style=") {
        issues.push("Missing inline styles".to_string());
    }
    for (fragment, issue) in STYLE_CHECKS {
        if !section.contains(fragment) {
            issues.push(issue.to_string());
        }
    }

    let count = section.matches(r#"<a href="/blog/"#).count();
    if count < 3 {
        issues.push(format!("Only {count} related articles (recommend 3-4)"));
    }
    if count > 5 {
        issues.push(format!("Too many related articles ({count}, recommend 3-4)"));
    }
    issues
}

pub fn audit_posts(dir: &Path) -> Result<RelatedReport> {
    let mut report = RelatedReport::default();

    for path in walk::blog_posts(dir) {
        let file = walk::file_name(&path);
        let html = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        report.total += 1;

        if !html.contains(HEADING) {
            report.no_related += 1;
            report.missing_related.push(file);
            continue;
        }
        report.has_related += 1;

        if let Some(range) = section_range(&html) {
            let issues = check_section(&html[range]);
            if !issues.is_empty() {
                report.format_issues.push(FormatIssue { file, issues });
            }
        }
    }
    Ok(report)
}

fn render_section(cards: &[Card]) -> String {
    let mut out = String::from(
        "      <h2 style=\"margin-top: 56px; padding-top: 40px; border-top: 2px solid var(--border-light);\">Related Articles</h2>\n\n      <div style=\"display: grid; grid-template-columns: 1fr; gap: 16px; margin-bottom: 56px;\">\n",
    );
    for card in cards {
        let _ = write!(
            out,
            "\n        <a href=\"{}\" style=\"display: block; padding: 16px 20px; border: 3px solid var(--brand-orange); background: var(--white); border-radius: 12px; text-decoration: none; color: var(--text-dark); transition: background 0.15s;\">\n          <h3 style=\"font-size: 18px; font-weight: 600; margin: 0 0 8px 0;\">{}</h3>\n          <p style=\"font-size: 15px; color: var(--text-muted); margin: 0;\">{}</p>\n        </a>\n",
            card.url, card.title, card.description
        );
    }
    out.push_str("      </div>");
    out
}

/// Cards from the links already in a block. Title and description keep
/// their markup.
fn existing_cards(section: &str) -> Vec<Card> {
    let link = Regex::new(r#"(?s)<a href="([^"]+)"[^>]*>(.*?)</a>"#).expect("static pattern");
    let h3 = Regex::new(r"<h3[^>]*>(.*?)</h3>").expect("static pattern");
    let p = Regex::new(r"<p[^>]*>(.*?)</p>").expect("static pattern");

    link.captures_iter(section)
        .take(MAX_CARDS)
        .map(|caps| {
            let inner = caps.get(2).map_or("", |m| m.as_str());
            let capture = |re: &Regex, fallback: &str| {
                re.captures(inner)
                    .and_then(|c| c.get(1))
                    .map_or_else(|| fallback.to_string(), |m| m.as_str().to_string())
            };
            Card {
                url: caps.get(1).map_or(String::new(), |m| m.as_str().to_string()),
                title: capture(&h3, "Article Title"),
                description: capture(&p, "Article description"),
            }
        })
        .collect()
}

/// Rewrite an existing block in the standard format, or insert one built
/// from `suggestions` before the FAQ heading or `</main>`.
///
/// `None` when nothing applies: a block without links, or a post without
/// a block and without suggestions or an insertion point.
pub fn fix_post(html: &str, suggestions: Option<&[Suggestion]>) -> Option<String> {
    if html.contains(HEADING) {
        let range = section_range(html)?;
        let cards = existing_cards(&html[range.clone()]);
        if cards.is_empty() {
            return None;
        }
        let mut out = html.to_string();
        out.replace_range(range, &render_section(&cards));
        return Some(out);
    }

    let suggestions = suggestions.filter(|s| !s.is_empty())?;
    let cards: Vec<Card> = suggestions
        .iter()
        .map(|s| Card {
            url: escape(&s.url).into_owned(),
            title: escape(&s.title).into_owned(),
            description: escape(&s.description).into_owned(),
        })
        .collect();
    let block = render_section(&cards);

    if html.contains(FAQ_HEADING) {
        Some(html.replacen(FAQ_HEADING, &format!("{block}\n\n      {FAQ_HEADING}"), 1))
    } else if html.contains("</main>") {
        Some(html.replacen("</main>", &format!("{block}\n\n    </main>"), 1))
    } else {
        None
    }
}

pub fn load_suggestions(path: &Path) -> Result<BTreeMap<String, Vec<Suggestion>>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("malformed suggestions {}", path.display()))
}

/// Hand-picked related posts for the posts that shipped without a block.
pub fn default_suggestions() -> BTreeMap<String, Vec<Suggestion>> {
    let s = Suggestion::new;
    let table = [
        (
            "active-working-dog-nutrition.html",
            vec![
                s("/blog/protein-for-dogs.html", "Protein for Dogs", "Why active dogs need optimal protein levels"),
                s("/blog/beef-liver-for-dogs.html", "Beef Liver for Dogs", "Nutrient-dense organ meat for working dogs"),
                s("/blog/joint-supplements-for-dogs.html", "Joint Supplements for Dogs", "Supporting active dogs' joint health"),
            ],
        ),
        (
            "beef-liver-for-dogs.html",
            vec![
                s("/blog/organ-based-nutrition-for-dogs.html", "Organ-Based Nutrition for Dogs", "Why organ meats are nutritional powerhouses"),
                s("/blog/whole-food-vs-synthetic-nutrients.html", "Whole Food vs Synthetic Vitamins", "Why whole-food nutrients are better absorbed"),
                s("/blog/vitamin-a-supplement.html", "Vitamin A for Dogs", "Liver as a natural source of vitamin A"),
            ],
        ),
        (
            "bone-broth-for-dogs.html",
            vec![
                s("/blog/collagen-for-dogs-benefits.html", "Collagen for Dogs", "Why bone broth is rich in collagen"),
                s("/blog/joint-supplements-for-dogs.html", "Joint Supplements for Dogs", "How bone broth supports joint health"),
                s("/blog/gut-health-for-dogs.html", "Gut Health for Dogs", "Bone broth for digestive support"),
            ],
        ),
        (
            "how-much-liver-to-feed-dog.html",
            vec![
                s("/blog/beef-liver-for-dogs.html", "Beef Liver for Dogs", "Understanding liver's nutritional benefits"),
                s("/blog/organ-based-nutrition-for-dogs.html", "Organ-Based Nutrition", "How to balance organ meats in diet"),
                s("/blog/dog-vitamins-deficiency.html", "Dog Vitamin Deficiency", "Signs your dog needs more nutrients"),
            ],
        ),
        (
            "organ-based-nutrition-for-dogs.html",
            vec![
                s("/blog/beef-liver-for-dogs.html", "Beef Liver for Dogs", "The most nutrient-dense organ meat"),
                s("/blog/whole-food-vs-synthetic-nutrients.html", "Whole Food vs Synthetic", "Why whole-food organs are superior"),
                s("/blog/protein-for-dogs.html", "Protein for Dogs", "Complete protein from organ meats"),
            ],
        ),
        (
            "whole-food-vs-synthetic-nutrients.html",
            vec![
                s("/blog/beef-liver-for-dogs.html", "Beef Liver for Dogs", "Whole-food nutrition from organ meats"),
                s("/blog/why-dogs-need-supplements.html", "Why Dogs Need Supplements", "Choosing the right supplement form"),
                s("/blog/can-dogs-take-human-supplements.html", "Can Dogs Take Human Supplements?", "Why dog-specific formulations matter"),
            ],
        ),
        (
            "zinc-for-dogs.html",
            vec![
                s("/blog/antioxidants-for-dogs.html", "Antioxidants for Dogs", "Zinc as an essential antioxidant mineral"),
                s("/blog/immune-support-for-dogs.html", "Immune Support for Dogs", "How zinc supports immune function"),
                s("/blog/dog-skin-coat-supplements.html", "Dog Skin & Coat Supplements", "Zinc for healthy skin and coat"),
            ],
        ),
    ];
    table.into_iter().map(|(file, cards)| (file.to_string(), cards)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_block_has_no_issues() {
        let cards: Vec<Card> = (0..3)
            .map(|i| Card {
                url: format!("/blog/post-{i}.html"),
                title: format!("Post {i}"),
                description: "About it".to_string(),
            })
            .collect();
        assert!(check_section(&render_section(&cards)).is_empty());
    }

    #[test]
    fn test_section_stops_at_main_close() {
        let html = "<main><h2>Related Articles</h2><a href=\"/blog/a.html\">A</a></main><footer><h2>x</h2></footer>";
        let range = section_range(html).unwrap();
        assert!(html[range].ends_with("</a>"));
    }
}
