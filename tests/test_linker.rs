use larder::linker::*;

const ZINC: &str = "/blog/zinc-for-dogs.html";

fn page(body: &str) -> String {
    format!(
        "<html><head><title>Kelp</title></head><body><nav><a href=\"/\">Home</a></nav><main>{body}</main></body></html>"
    )
}

fn zinc_rule() -> LinkRule {
    LinkRule::new(&["zinc"], &["what-it-is"], ZINC)
}

#[test]
fn test_link_page_wraps_first_keyword_in_section() {
    let html = page(
        "<h1>Kelp</h1><h2 id=\"what-it-is\">What It Is</h2><p>Kelp supplies Zinc and iodine.</p><h2 id=\"why-used\">Why</h2><p>zinc again</p>",
    );
    let linked = link_page(&html, &[zinc_rule()], DEFAULT_MAX_LINKS);
    assert_eq!(linked.added, vec![ZINC]);
    assert!(linked.html.contains(r#"<a href="/blog/zinc-for-dogs.html">Zinc</a> and iodine"#));
    assert!(linked.html.contains("<p>zinc again</p>"));
}

#[test]
fn test_link_page_skips_when_already_linked() {
    let html = page(&format!(
        "<h2 id=\"what-it-is\">What It Is</h2><p>See <a href=\"{ZINC}\">zinc</a>.</p><p>More zinc.</p>"
    ));
    let linked = link_page(&html, &[zinc_rule()], DEFAULT_MAX_LINKS);
    assert!(linked.added.is_empty());
    assert_eq!(linked.html, html);
}

#[test]
fn test_link_page_respects_max_links() {
    let rules: Vec<LinkRule> = ["iron", "zinc", "copper", "iodine"]
        .iter()
        .map(|k| LinkRule::new(&[*k], &[], &format!("/blog/{k}.html")))
        .collect();
    let html = page("<p>iron</p><p>zinc</p><p>copper</p><p>iodine</p>");
    let linked = link_page(&html, &rules, 3);
    assert_eq!(linked.added.len(), 3);
    assert!(linked.html.contains("<p>iodine</p>"));
}

#[test]
fn test_link_page_whole_words_only() {
    let rule = LinkRule::new(&["tuna"], &[], "/blog/tuna.html");
    let html = page("<p>Fortunately it is not here.</p>");
    assert!(link_page(&html, &[rule], 3).added.is_empty());
}

#[test]
fn test_link_blog_skips_headings_and_anchors() {
    let rule = LinkRule::new(&["ginger"], &[], "/ingredient-analyzer/ingredients/ginger/");
    let html = "<html><body><article><h2>Ginger basics</h2><p><a href=\"/x\">ginger tea</a> and fresh ginger root.</p></article></body></html>";
    let linked = link_blog(html, &[rule]);
    assert_eq!(linked.added.len(), 1);
    assert!(linked.html.contains("<h2>Ginger basics</h2>"));
    assert!(linked.html.contains(
        r#"fresh <a href="/ingredient-analyzer/ingredients/ginger/">ginger</a> root"#
    ));
    assert!(!has_nested_anchor(&linked.html));
}

#[test]
fn test_link_blog_exclusion_phrase() {
    let rule = LinkRule::new(&["whitefish"], &[], "/ingredient-analyzer/ingredients/whitefish/")
        .excluding(&["whitefish meal"]);
    let html = "<article><p>Whitefish meal is rendered.</p><li>Plain whitefish is lean.</li></article>";
    let linked = link_blog(html, &[rule]);
    assert!(linked.html.contains("<p>Whitefish meal is rendered.</p>"));
    assert!(linked.html.contains(r#"Plain <a href="/ingredient-analyzer/ingredients/whitefish/">whitefish</a>"#));
}

#[test]
fn test_default_rules_never_nest_anchors() {
    let html = page(
        "<h2 id=\"what-it-is\">What It Is</h2><p>Rich in <a href=\"/x\">vitamin A and zinc</a>, plus omega-3 fatty acids, probiotics and collagen.</p><p>Vitamin A, zinc, omega-3, probiotics, collagen and glucosamine.</p><h2 id=\"why-used\">Why</h2><p>Joint support with glucosamine and fish oil.</p>",
    );
    let linked = link_page(&html, &default_page_rules(), DEFAULT_MAX_LINKS);
    assert!(!has_nested_anchor(&linked.html));
    assert!(linked.added.len() <= DEFAULT_MAX_LINKS);

    let blog = format!("<article>{}</article>", "<p>Anchovies, tuna, ginger, pectin and olive oil.</p>");
    assert!(!has_nested_anchor(&link_blog(&blog, &default_blog_rules()).html));
}

#[test]
fn test_nested_anchor_detection() {
    assert!(has_nested_anchor(r#"<a href="/a"><a href="/b">x</a></a>"#));
    assert!(!has_nested_anchor(r#"<a href="/a">x</a> <a href="/b">y</a>"#));
}

#[test]
fn test_rules_load_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.json");
    std::fs::write(&path, r#"[{"keywords": ["kelp"], "link": "/blog/kelp.html"}]"#).unwrap();
    let rules = load_rules(&path).unwrap();
    assert_eq!(rules, vec![LinkRule::new(&["kelp"], &[], "/blog/kelp.html")]);
}
