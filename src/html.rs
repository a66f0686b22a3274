//! Text-level HTML helpers.
//!
//! Pages are treated as opaque strings: nothing here builds a tree. Every
//! function compiles its own patterns, so no matcher state survives between
//! files.

use std::borrow::Cow;
use std::ops::Range;

use regex::Regex;

const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Escape text for element content and attribute values.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Serialized JSON is safe inside `<script>` once `</` can't close the element.
pub fn escape_json_ld(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub fn strip_tags(html: &str) -> String {
    let tag = Regex::new(r"<[^>]*>").expect("static pattern");
    tag.replace_all(html, "").into_owned()
}

/// Longest prefix of at most `max` chars.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Byte ranges of the first `<tag …>…</tag>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub outer: Range<usize>,
    pub inner: Range<usize>,
}

pub fn element(html: &str, tag: &str) -> Option<Element> {
    let pattern = format!(r"(?is)<{tag}\b[^>]*>(.*?)</{tag}>", tag = regex::escape(tag));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(html)?;
    let outer = caps.get(0)?.range();
    let inner = caps.get(1)?.range();
    Some(Element { outer, inner })
}

pub fn element_inner<'a>(html: &'a str, tag: &str) -> Option<&'a str> {
    element(html, tag).map(|e| &html[e.inner])
}

/// Body of the `<h2>` section whose `id` equals `key` or whose text starts
/// with it (case-insensitive), up to the next `<h2` or the end of input.
pub fn section(html: &str, key: &str) -> Option<Range<usize>> {
    let heading = Regex::new(r#"(?is)<h2([^>]*)>(.*?)</h2>"#).expect("static pattern");
    let id_attr = format!(r#"id="{key}""#);
    let key_lower = key.to_lowercase();

    let found = heading.captures_iter(html).find(|caps| {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let text = caps.get(2).map_or(String::new(), |m| strip_tags(m.as_str()));
        attrs.contains(&id_attr) || text.trim().to_lowercase().starts_with(&key_lower)
    })?;

    let start = found.get(0)?.end();
    let end = html[start..].find("<h2").map_or(html.len(), |i| start + i);
    Some(start..end)
}

pub fn h1_text(html: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("static pattern");
    re.captures(html).and_then(|c| c.get(1)).map(|m| strip_tags(m.as_str()).trim().to_string())
}

pub fn title_text(html: &str) -> Option<String> {
    element_inner(html, "title").map(|t| t.trim().to_string())
}

/// Opening tags named exactly `tag` (`<h1>` or `<h1 class=…>`, not `<h10>`).
pub fn count_tag(html: &str, tag: &str) -> usize {
    let pattern = format!(r"(?i)<{}[\s>/]", regex::escape(tag));
    Regex::new(&pattern).map_or(0, |re| re.find_iter(html).count())
}

pub fn json_ld_blocks(html: &str) -> Vec<&str> {
    let re = Regex::new(r#"(?is)<script type="application/ld\+json">(.*?)</script>"#)
        .expect("static pattern");
    re.captures_iter(html).filter_map(|c| c.get(1)).map(|m| m.as_str()).collect()
}

/// `href` values of every anchor whose target starts with `prefix`.
pub fn hrefs_with_prefix<'a>(html: &'a str, prefix: &str) -> Vec<&'a str> {
    let pattern = format!(r#"<a href="({}[^"]*)""#, regex::escape(prefix));
    Regex::new(&pattern)
        .map(|re| re.captures_iter(html).filter_map(|c| c.get(1)).map(|m| m.as_str()).collect())
        .unwrap_or_default()
}

/// Byte ranges of character data, outside every tag.
///
/// With a non-empty `within`, only text nested in one of those elements
/// counts. Text nested in any `skip` element never counts.
pub fn text_spans(html: &str, within: &[&str], skip: &[&str]) -> Vec<Range<usize>> {
    let bytes = html.as_bytes();
    let mut spans = Vec::new();
    let mut within_depth = 0usize;
    let mut skip_depth = 0usize;
    let mut text_start = 0usize;
    let mut i = 0usize;

    let open = |within_depth: usize, skip_depth: usize| {
        skip_depth == 0 && (within.is_empty() || within_depth > 0)
    };

    while i < bytes.len() {
        if bytes[i] != b'<' {
            i += 1;
            continue;
        }
        let Some(close) = html[i..].find('>').map(|o| i + o) else {
            break;
        };

        if text_start < i && open(within_depth, skip_depth) {
            spans.push(text_start..i);
        }

        let raw = &html[i + 1..close];
        let closing = raw.starts_with('/');
        let name: String = raw
            .trim_start_matches('/')
            .chars()
            .take_while(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        let self_closing = raw.ends_with('/');

        if !name.is_empty() && !self_closing {
            let depth = if skip.contains(&name.as_str()) {
                Some(&mut skip_depth)
            } else if within.contains(&name.as_str()) {
                Some(&mut within_depth)
            } else {
                None
            };
            if let Some(depth) = depth {
                if closing {
                    *depth = depth.saturating_sub(1);
                } else {
                    *depth += 1;
                }
            }
        }

        i = close + 1;
        text_start = i;
    }

    if text_start < html.len() && open(within_depth, skip_depth) {
        spans.push(text_start..html.len());
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_borrows_clean_text() {
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
        assert_eq!(escape("FD&C \"Blue\""), "FD&amp;C &quot;Blue&quot;");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("açaí", 3), "aça");
        assert_eq!(truncate_chars("short", 50), "short");
    }

    #[test]
    fn test_section_by_id_and_text() {
        let html = r#"<h2 id="what-it-is">What It Is</h2><p>a</p><h2>Why It's Used in Food</h2><p>b</p>"#;
        assert_eq!(&html[section(html, "what-it-is").unwrap()], "<p>a</p>");
        assert_eq!(&html[section(html, "Why It's Used").unwrap()], "<p>b</p>");
        assert!(section(html, "Scientific Evidence").is_none());
    }

    #[test]
    fn test_text_spans_skip_anchor() {
        let html = r#"<p>liver <a href="/x">liver</a> liver</p>"#;
        let spans = text_spans(html, &["p"], &["a"]);
        let texts: Vec<&str> = spans.iter().map(|r| &html[r.clone()]).collect();
        assert_eq!(texts, vec!["liver ", " liver"]);
    }

    #[test]
    fn test_count_tag_exact_name() {
        assert_eq!(count_tag("<h1>A</h1><h1 class=\"x\">B</h1><h10>", "h1"), 2);
    }
}
