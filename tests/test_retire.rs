use std::fs;

use larder::config::{Config, Site};
use larder::db::Database;
use larder::render;
use larder::retire::*;
use larder::sitemap::{self, Entry, Sitemap};
use serde_json::json;

const SQUASH: &str = "/ingredient-analyzer/ingredients/squash/";

fn record(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "category": "vegetable",
        "whatItIs": format!("{name} is a winter vegetable."),
        "whyUsed": ["fiber"],
        "qualityNote": "",
        "wattsPosition": "good",
        "wattsTake": ""
    })
}

/// Generated pages, directory and sitemap for `names`.
fn site_with(names: &[&str]) -> (tempfile::TempDir, Site) {
    let dir = tempfile::tempdir().unwrap();
    let site = Site::new(dir.path(), Config::default());
    let records: Vec<_> = names.iter().map(|n| record(n)).collect();
    let db = Database::from_json(&json!({ "ingredients": records }).to_string()).unwrap();

    render::generate_pages(&db, &site, None).unwrap();
    render::generate_directory(&db, &site).unwrap();
    let mut map = Sitemap::default();
    for ing in &db.ingredients {
        map.add(&Entry::new(sitemap::ingredient_loc(&site.config.site.base_url, &ing.slug())));
    }
    map.write(&site.sitemap()).unwrap();
    (dir, site)
}

#[test]
fn test_remove_card_only_touches_its_slug() {
    let html = format!(
        "<div class=\"grid\">\n  <a href=\"{SQUASH}\" class=\"ingredient-card\">\n    <h2>Squash</h2>\n  </a>\n  <a href=\"/ingredient-analyzer/ingredients/kelp/\" class=\"ingredient-card\">\n    <h2>Kelp</h2>\n  </a>\n</div>"
    );
    let out = remove_card(&html, "squash");
    assert_eq!(
        out,
        "<div class=\"grid\">\n  <a href=\"/ingredient-analyzer/ingredients/kelp/\" class=\"ingredient-card\">\n    <h2>Kelp</h2>\n  </a>\n</div>"
    );
    assert_eq!(remove_card(&out, "squash"), out);
}

#[test]
fn test_retarget_links_exact_slug() {
    let html = format!(
        r#"<a href="{SQUASH}">a</a><a href="/ingredient-analyzer/ingredients/squash-seed/">b</a>"#
    );
    assert_eq!(
        retarget_links(&html, "squash", "pumpkin"),
        r#"<a href="/ingredient-analyzer/ingredients/pumpkin/">a</a><a href="/ingredient-analyzer/ingredients/squash-seed/">b</a>"#
    );
}

#[test]
fn test_retire_sitemap_directory_and_redirect() {
    let (_dir, site) = site_with(&["Pumpkin", "Squash"]);
    let pumpkin_page = site.ingredients_dir().join("pumpkin/index.html");
    assert!(fs::read_to_string(&pumpkin_page).unwrap().contains(SQUASH));
    let urls_before = Sitemap::read(&site.sitemap()).unwrap().url_count();

    let retired = retire(&site, "squash", Some("pumpkin"), false).unwrap();
    assert_eq!(
        retired,
        Retired { sitemap_entries: 1, card_removed: true, redirected: 1, purged: false }
    );

    let map = Sitemap::read(&site.sitemap()).unwrap();
    assert_eq!(map.url_count(), urls_before - 1);
    assert!(!map.contains(&sitemap::ingredient_loc(&site.config.site.base_url, "squash")));

    let directory = fs::read_to_string(site.directory_page()).unwrap();
    assert!(!directory.contains(SQUASH));
    assert!(
        directory.contains("/ingredient-analyzer/ingredients/pumpkin/\" class=\"ingredient-card\"")
    );

    assert!(!fs::read_to_string(&pumpkin_page).unwrap().contains(SQUASH));
    assert!(site.ingredients_dir().join("squash/index.html").exists());
}

#[test]
fn test_retire_twice_is_noop_and_purge_deletes() {
    let (_dir, site) = site_with(&["Squash"]);
    retire(&site, "squash", None, false).unwrap();

    let again = retire(&site, "squash", None, true).unwrap();
    assert_eq!(again.sitemap_entries, 0);
    assert!(!again.card_removed);
    assert!(again.purged);
    assert!(!site.ingredients_dir().join("squash").exists());
}
