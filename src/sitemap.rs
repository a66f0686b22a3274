//! In-place edits of an existing `sitemap.xml`.
//!
//! The file is kept as text: entries are spliced in before `</urlset>` and
//! whole `<url>` blocks are cut out, so hand-written formatting elsewhere
//! survives.

use std::borrow::Cow;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;

use crate::date::Date;
use crate::render::{ANALYZER_PATH, INGREDIENTS_PATH};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const CLOSE: &str = "</urlset>";

/// Time of day appended to generated `lastmod` dates.
pub const LASTMOD_TIME: &str = "T09:00:00-05:00";

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

impl Entry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self { loc: loc.into(), lastmod: None, changefreq: None, priority: None }
    }

    pub fn lastmod(mut self, lastmod: impl Into<String>) -> Self {
        self.lastmod = Some(lastmod.into());
        self
    }

    pub fn changefreq(mut self, changefreq: &str) -> Self {
        self.changefreq = Some(changefreq.to_string());
        self
    }

    pub fn priority(mut self, priority: &str) -> Self {
        self.priority = Some(priority.to_string());
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&self.loc));
        let fields = [
            ("lastmod", &self.lastmod),
            ("changefreq", &self.changefreq),
            ("priority", &self.priority),
        ];
        for (tag, value) in fields {
            if let Some(value) = value {
                let _ = writeln!(xml, "    <{tag}>{}</{tag}>", escape_xml(value));
            }
        }
        xml.push_str("  </url>\n");
        xml
    }
}

#[derive(Debug, Clone)]
pub struct Sitemap {
    text: String,
}

impl Default for Sitemap {
    fn default() -> Self {
        Self::from_text(format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"{SITEMAP_NS}\">\n{CLOSE}\n"
        ))
    }
}

impl Sitemap {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self::from_text(text))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.text).with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn locs(&self) -> Vec<String> {
        let re = Regex::new(r"(?s)<loc>\s*(.*?)\s*</loc>").expect("static pattern");
        re.captures_iter(&self.text)
            .filter_map(|c| c.get(1))
            .map(|m| unescape_xml(m.as_str()).into_owned())
            .collect()
    }

    pub fn url_count(&self) -> usize {
        self.text.matches("<url>").count()
    }

    pub fn contains(&self, loc: &str) -> bool {
        self.locs().iter().any(|l| l == loc)
    }

    /// Insert before `</urlset>`. Returns false when the loc is already
    /// listed.
    pub fn add(&mut self, entry: &Entry) -> bool {
        if self.contains(&entry.loc) {
            return false;
        }
        let xml = entry.to_xml();
        match self.text.rfind(CLOSE) {
            Some(idx) => self.text.insert_str(idx, &xml),
            None => {
                self.text.push_str(&xml);
                self.text.push_str(CLOSE);
                self.text.push('\n');
            }
        }
        true
    }

    /// Cut every `<url>` block whose loc matches, with its trailing
    /// newline. Returns how many were removed.
    pub fn remove_loc(&mut self, loc: &str) -> usize {
        let pattern = format!(
            r"(?s)[ \t]*<url>\s*<loc>\s*{}\s*</loc>.*?</url>[ \t]*\r?\n?",
            regex::escape(&escape_xml(loc))
        );
        let Ok(re) = Regex::new(&pattern) else {
            return 0;
        };
        let removed = re.find_iter(&self.text).count();
        if removed > 0 {
            self.text = re.replace_all(&self.text, "").into_owned();
        }
        removed
    }
}

pub fn ingredient_loc(base_url: &str, slug: &str) -> String {
    format!("{}{INGREDIENTS_PATH}{slug}/", base_url.trim_end_matches('/'))
}

/// Analyzer page, directory page, then one entry per slug in sorted order.
pub fn entries_for(base_url: &str, slugs: &[String], date: Date) -> Vec<Entry> {
    let base = base_url.trim_end_matches('/');
    let lastmod = format!("{}{LASTMOD_TIME}", date.to_iso());

    let mut sorted: Vec<&String> = slugs.iter().collect();
    sorted.sort();
    sorted.dedup();

    let mut entries = vec![
        Entry::new(format!("{base}{ANALYZER_PATH}"))
            .lastmod(lastmod.clone())
            .changefreq("weekly")
            .priority("0.9"),
        Entry::new(format!("{base}{INGREDIENTS_PATH}"))
            .lastmod(lastmod.clone())
            .changefreq("weekly")
            .priority("0.8"),
    ];
    entries.extend(sorted.into_iter().map(|slug| {
        Entry::new(ingredient_loc(base, slug))
            .lastmod(lastmod.clone())
            .changefreq("monthly")
            .priority("0.7")
    }));
    entries
}

fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

fn unescape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_roundtrip_for_query_strings() {
        let loc = "https://example.com/?a=1&b=2";
        assert_eq!(escape_xml(loc), "https://example.com/?a=1&amp;b=2");
        assert_eq!(unescape_xml(&escape_xml(loc)), loc);
    }

    #[test]
    fn test_add_to_file_without_closing_tag() {
        let mut sitemap = Sitemap::from_text("<urlset>\n");
        assert!(sitemap.add(&Entry::new("https://example.com/")));
        assert!(sitemap.as_str().ends_with("</urlset>\n"));
        assert_eq!(sitemap.url_count(), 1);
    }
}
