use larder::date::Date;
use larder::sitemap::*;

const BASE: &str = "https://wattspet.com";

fn sample() -> Sitemap {
    Sitemap::from_text(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://wattspet.com/</loc>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://wattspet.com/ingredient-analyzer/ingredients/heart/</loc>
    <lastmod>2025-11-02</lastmod>
  </url>
  <url>
    <loc>https://wattspet.com/ingredient-analyzer/ingredients/beef-heart/</loc>
    <lastmod>2025-11-02</lastmod>
  </url>
</urlset>
"#,
    )
}

#[test]
fn test_remove_absent_is_noop() {
    let mut map = sample();
    let before = map.as_str().to_string();
    assert_eq!(map.remove_loc(&ingredient_loc(BASE, "squash")), 0);
    assert_eq!(map.as_str(), before);
}

#[test]
fn test_remove_present_drops_one_url() {
    let mut map = sample();
    let count = map.url_count();
    assert_eq!(map.remove_loc(&ingredient_loc(BASE, "heart")), 1);
    assert_eq!(map.url_count(), count - 1);
    assert!(map.contains(&ingredient_loc(BASE, "beef-heart")));
    assert!(!map.contains(&ingredient_loc(BASE, "heart")));
}

#[test]
fn test_add_is_idempotent() {
    let mut map = sample();
    let entry = Entry::new(ingredient_loc(BASE, "squash")).lastmod("2026-01-25").priority("0.7");
    assert!(map.add(&entry));
    assert!(!map.add(&entry));
    assert_eq!(map.url_count(), 4);
    assert!(map.as_str().trim_end().ends_with("</urlset>"));
}

#[test]
fn test_read_write_preserves_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sitemap.xml");
    sample().write(&path).unwrap();
    assert_eq!(Sitemap::read(&path).unwrap().as_str(), sample().as_str());
}

#[test]
fn test_entries_for_priorities() {
    let slugs = vec!["squash".to_string(), "apple".to_string()];
    let entries = entries_for(BASE, &slugs, Date::new(2026, 1, 25));
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].loc, "https://wattspet.com/ingredient-analyzer/");
    assert_eq!(entries[0].priority.as_deref(), Some("0.9"));
    assert_eq!(entries[1].priority.as_deref(), Some("0.8"));
    assert_eq!(entries[2].loc, ingredient_loc(BASE, "apple"));
    assert_eq!(entries[3].lastmod.as_deref(), Some("2026-01-25T09:00:00-05:00"));
    assert_eq!(entries[3].changefreq.as_deref(), Some("monthly"));
}

#[test]
fn test_empty_sitemap_default() {
    let mut map = Sitemap::default();
    assert_eq!(map.url_count(), 0);
    assert!(map.add(&Entry::new("https://wattspet.com/blog/")));
    assert_eq!(map.locs(), ["https://wattspet.com/blog/"]);
}
