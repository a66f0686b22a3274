use std::fs;
use std::path::Path;

use larder::audit::{self, divs, enhanced, inline, links, related};
use larder::db::Database;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn ingredient_page(title: &str, what: &str, concerns: &str) -> String {
    format!(
        "<html><body><main><h1>{title}</h1>\
         <h2 id=\"what-it-is\">What Is {title}?</h2><p>{what}</p>\
         <h3>Compare to Similar Ingredients</h3><ul><li><a href=\"/ingredient-analyzer/ingredients/kelp/\">Kelp</a></li></ul>\
         <h2 id=\"concerns\">Potential Concerns</h2><p>{concerns}</p>\
         <h2 id=\"related-articles\">Related Articles</h2><a href=\"/blog/zinc-for-dogs.html\">Zinc</a>\
         </main></body></html>"
    )
}

#[test]
fn test_links_audit_counts_contextual_sections_only() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("spirulina/index.html"),
        &ingredient_page(
            "Spirulina",
            "Rich in <a href=\"/blog/protein-for-dogs.html\">protein</a> and <a href=\"/ingredient-analyzer/ingredients/chlorella/\">chlorella</a>-like pigments.",
            "Rarely, <a href=\"/blog/dog-food-allergies.html\">allergies</a>.",
        ),
    );
    write(&dir.path().join("barley/index.html"), &ingredient_page("Barley", "A grain.", "None."));

    let report = links::audit_pages(dir.path()).unwrap();
    assert_eq!(report.summary.total_pages, 2);
    assert_eq!(report.summary.pages_with_links, 1);
    assert_eq!(report.summary.pages_with_enough_links, 1);
    assert_eq!(report.pages[0].dir, "barley");
    assert_eq!(report.pages[0].total_contextual_links, 0);

    let spirulina = &report.pages[1];
    assert_eq!((spirulina.blog_links, spirulina.ingredient_links), (2, 1));
    assert!(!spirulina.needs_more);
}

#[test]
fn test_report_round_trip_uses_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("barley/index.html"), &ingredient_page("Barley", "A grain.", "None."));
    let report = links::audit_pages(dir.path()).unwrap();

    let path = dir.path().join("reports/ingredient-links-audit.json");
    audit::save_report(&path, &report).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"totalContextualLinks\": 0"));
    assert!(text.contains("\"pagesNeedingLinks\": 1"));

    let back: links::LinksReport = audit::load_report(&path).unwrap();
    assert_eq!(back.needing_more().count(), 1);
}

#[test]
fn test_inline_audit_unique_links_before_related() {
    let dir = tempfile::tempdir().unwrap();
    write(
        &dir.path().join("zinc-for-dogs.html"),
        "<h1>Zinc for Dogs</h1><article>\
         <p><a href=\"/blog/immune-support-for-dogs.html\">immune</a> and again \
         <a href=\"/blog/immune-support-for-dogs.html\">immune</a>, plus \
         <a href=\"/ingredient-analyzer/ingredients/oysters/\">oysters</a>.</p>\
         <h2>Related Articles</h2><a href=\"/blog/antioxidants-for-dogs.html\">x</a></article>",
    );
    write(&dir.path().join("index.html"), "<article></article>");
    write(&dir.path().join("zinc-REDESIGN.html"), "<article></article>");

    let posts = inline::audit_posts(dir.path()).unwrap();
    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.title, "Zinc for Dogs");
    assert_eq!((post.blog_links, post.ingredient_links), (1, 1));
    assert!(post.needs_more);
    assert_eq!(post.links_list, ["/blog/immune-support-for-dogs.html"]);
}

#[test]
fn test_related_audit_and_fix() {
    let dir = tempfile::tempdir().unwrap();
    let plain = "<main><p>Body</p><h2>Related Articles</h2>\
                 <a href=\"/blog/a.html\"><h3>A</h3><p>About A</p></a>\
                 <a href=\"/blog/b.html\">B</a>\
                 <h2>Frequently Asked Questions</h2></main>";
    write(&dir.path().join("beef-liver-for-dogs.html"), plain);
    write(&dir.path().join("zinc-for-dogs.html"), "<main><h2>Frequently Asked Questions</h2></main>");

    let report = related::audit_posts(dir.path()).unwrap();
    assert_eq!((report.total, report.has_related, report.no_related), (2, 1, 1));
    assert_eq!(report.missing_related, ["zinc-for-dogs.html"]);
    let issues = &report.format_issues[0].issues;
    assert!(issues.contains(&"Missing inline styles".to_string()));
    assert!(issues.contains(&"Only 2 related articles (recommend 3-4)".to_string()));

    let fixed = related::fix_post(plain, None).unwrap();
    assert!(fixed.contains("<h3 style=\"font-size: 18px; font-weight: 600; margin: 0 0 8px 0;\">A</h3>"));
    assert!(fixed.contains(">Article Title</h3>"));
    assert!(fixed.contains("<h2>Frequently Asked Questions</h2>"));

    let suggestions = related::default_suggestions();
    let picks = suggestions.get("zinc-for-dogs.html").map(Vec::as_slice);
    let added = related::fix_post("<main><h2>Frequently Asked Questions</h2></main>", picks).unwrap();
    let section = &added[..added.find("<h2>Frequently").unwrap()];
    assert!(related::check_section(section).is_empty());
    assert!(section.contains("Dog Skin &amp; Coat Supplements"));

    assert!(related::fix_post("<main></main>", None).is_none());
}

#[test]
fn test_divs_check_posts() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("ok.html"), "<div class=\"quick-facts\">\n<p>x</p>\n</div>\n");
    write(&dir.path().join("broken.html"), "<div>\n<div>\n</div>\n");

    let results = divs::check_posts(dir.path()).unwrap();
    assert_eq!(results.len(), 2);
    let (name, broken) = &results[0];
    assert_eq!(name, "broken.html");
    assert_eq!((broken.opens, broken.closes), (2, 1));
    assert!(results[1].1.is_clean());
}

#[test]
fn test_enhanced_progress() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("kelp/index.html"), "<h3>Compare to Similar Ingredients</h3>");
    write(&dir.path().join("barley/index.html"), "<p>plain</p>");
    write(&dir.path().join("apple/index.html"), "<p>plain</p>");
    assert_eq!(enhanced::pages_missing_comparisons(dir.path()).unwrap(), ["apple", "barley"]);

    let db = Database::from_json(
        r#"{"ingredients": [
            {"name": "Kelp", "category": "mineral", "wattsPosition": "good", "enhanced": true,
             "whatItIsExpanded": {"compareToSimilar": [{"ingredient": "spirulina"}]}},
            {"name": "Barley", "category": "carbohydrate", "wattsPosition": "neutral"}
        ]}"#,
    )
    .unwrap();
    assert_eq!(enhanced::records_missing_comparisons(&db), ["Barley"]);
    let bad = enhanced::bad_comparisons(&db);
    assert_eq!(bad.len(), 1);
    assert_eq!((bad[0].name.as_str(), bad[0].index), ("Kelp", 0));
    assert_eq!(enhanced::unenhanced(&db).len(), 1);
}
