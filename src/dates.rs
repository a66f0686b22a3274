//! Refreshing stale publication dates on blog posts.

use anyhow::{Result, bail};
use regex::Regex;

use crate::date::Date;

const MONTH_NAMES: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

/// Any schema (`2024-06-01`) or visible (`June 1, 2024`) date earlier than
/// the first of `cutoff`.
pub fn needs_update(html: &str, cutoff: Date) -> bool {
    let cutoff = (cutoff.year, cutoff.month);

    let schema = Regex::new(r"\b(\d{4})-(\d{2})-\d{2}").expect("static pattern");
    let stale_schema = schema.captures_iter(html).any(|c| {
        let year = c[1].parse::<u16>().unwrap_or(u16::MAX);
        let month = c[2].parse::<u8>().unwrap_or(u8::MAX);
        (year, month) < cutoff
    });
    if stale_schema {
        return true;
    }

    let visible = Regex::new(&format!(r"\b({MONTH_NAMES}) \d{{1,2}}, (\d{{4}})"))
        .expect("static pattern");
    visible.captures_iter(html).any(|c| {
        let month = crate::date::month_number(&c[1]).unwrap_or(u8::MAX);
        let year = c[2].parse::<u16>().unwrap_or(u16::MAX);
        (year, month) < cutoff
    })
}

/// Point `datePublished`, `dateModified` and the `article-meta` line at
/// `timestamp`. An `Updated …` suffix on the visible line is dropped.
pub fn refresh(html: &str, timestamp: &str) -> String {
    let published = Regex::new(r#""datePublished":\s*"[^"]+""#).expect("static pattern");
    let modified = Regex::new(r#""dateModified":\s*"[^"]+""#).expect("static pattern");

    let out = published.replace_all(html, format!(r#""datePublished": "{timestamp}""#).as_str());
    let out = modified.replace_all(&out, format!(r#""dateModified": "{timestamp}""#).as_str());
    let mut out = out.into_owned();

    let Some(visible) = Date::parse(timestamp).map(Date::to_long) else {
        return out;
    };
    let meta = format!(r#"<div class="article-meta">{visible}</div>"#);

    let prefixed =
        Regex::new(r#"<div class="article-meta">Published [^<•]+(?:•[^<]+)?</div>"#)
            .expect("static pattern");
    let bare = Regex::new(&format!(
        r#"<div class="article-meta">({MONTH_NAMES}) \d{{1,2}}, \d{{4}}(?:\s*•[^<]+)?</div>"#
    ))
    .expect("static pattern");

    out = prefixed.replace_all(&out, regex::NoExpand(&meta)).into_owned();
    bare.replace_all(&out, regex::NoExpand(&meta)).into_owned()
}

/// Refresh a stale page with the next scheduled timestamp. Returns the new
/// text and the timestamp used; the slot is only taken when the page
/// actually changes.
pub fn update(html: &str, cutoff: Date, schedule: &mut Schedule) -> Option<(String, String)> {
    if !needs_update(html, cutoff) {
        return None;
    }
    let updated = refresh(html, schedule.peek());
    if updated == html {
        return None;
    }
    schedule.next().map(|timestamp| (updated, timestamp))
}

/// Hands out the configured timestamps in order, wrapping around.
#[derive(Debug, Clone)]
pub struct Schedule {
    entries: Vec<String>,
    next: usize,
}

impl Schedule {
    pub fn new(entries: &[String]) -> Result<Self> {
        if entries.is_empty() {
            bail!("the date schedule is empty");
        }
        if let Some(bad) = entries.iter().find(|e| Date::parse(e).is_none()) {
            bail!("schedule entry `{bad}` is not an RFC 3339 timestamp");
        }
        Ok(Self { entries: entries.to_vec(), next: 0 })
    }

    /// The timestamp `next` will hand out.
    pub fn peek(&self) -> &str {
        &self.entries[self.next % self.entries.len()]
    }
}

impl Iterator for Schedule {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let entry = self.entries.get(self.next % self.entries.len())?.clone();
        self.next += 1;
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updated_suffix_is_dropped() {
        let html = r#"<div class="article-meta">Published March 3, 2024 • Updated May 1, 2024</div>"#;
        assert_eq!(
            refresh(html, "2026-01-05T09:00:00-05:00"),
            r#"<div class="article-meta">January 5, 2026</div>"#
        );
    }

    #[test]
    fn test_visible_date_past_2025_is_refreshed() {
        let html = r#"{"datePublished": "2026-03-01"}<div class="article-meta">March 1, 2026</div>"#;
        let cutoff = Date::parse_month("2027-01").unwrap();
        assert!(needs_update(html, cutoff));
        assert_eq!(
            refresh(html, "2027-02-01T09:00:00-05:00"),
            r#"{"datePublished": "2027-02-01T09:00:00-05:00"}<div class="article-meta">February 1, 2027</div>"#
        );
    }

    #[test]
    fn test_update_keeps_slot_when_nothing_changes() {
        let entries = vec!["2026-01-05T09:00:00-05:00".to_string()];
        let mut schedule = Schedule::new(&entries).unwrap();
        let cutoff = Date::parse_month("2025-12").unwrap();

        assert_eq!(update("<p>Since June 1, 2024 we ship.</p>", cutoff, &mut schedule), None);
        assert_eq!(schedule.peek(), entries[0]);

        let stale = r#"<div class="article-meta">June 1, 2024</div>"#;
        let (html, used) = update(stale, cutoff, &mut schedule).unwrap();
        assert_eq!(used, entries[0]);
        assert_eq!(html, r#"<div class="article-meta">January 5, 2026</div>"#);
    }

    #[test]
    fn test_schedule_wraps() {
        let entries =
            vec!["2026-01-01T09:00:00-05:00".to_string(), "2026-01-02T09:00:00-05:00".to_string()];
        let taken: Vec<String> = Schedule::new(&entries).unwrap().take(3).collect();
        assert_eq!(taken[2], entries[0]);
    }
}
