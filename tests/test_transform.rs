use std::fs;

use larder::transform::*;

#[test]
fn test_apply_writes_only_on_change() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.html");
    fs::write(&path, "<p>Ingredients</p>").unwrap();

    assert_eq!(apply(&path, |t| t.replace("Ingredients", "Ingredient Analyzer")).unwrap(), Outcome::Changed);
    assert_eq!(fs::read_to_string(&path).unwrap(), "<p>Ingredient Analyzer</p>");
    assert_eq!(apply(&path, |t| t.replace("Ingredients<", "x<")).unwrap(), Outcome::Unchanged);
}

#[test]
fn test_apply_missing_file_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = apply(&dir.path().join("gone.html"), str::to_uppercase).unwrap();
    assert_eq!(outcome, Outcome::Missing);
}

const RULES: &str = r#"
roots = ["blog"]
files = ["style.css"]

[[rules]]
name = "nav label"
find = '<a href="/ingredient-analyzer/">Ingredients</a>'
replace = '<a href="/ingredient-analyzer/">Ingredient Analyzer</a>'

[[rules]]
name = "callout css"
files = ["style.css"]
find = "/* end */"
replace = ".callout { padding: 20px; }\n/* end */"
marker = ".callout {"
once = true

[[rules]]
name = "h1"
regex = '<h1>Barley</h1>'
replace = '<h1>Barley in Dog Food: Is It Safe?</h1>'
"#;

#[test]
fn test_patch_set_run_and_idempotency() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("blog/drafts")).unwrap();
    fs::write(root.join("blog/a.html"), r#"<nav><a href="/ingredient-analyzer/">Ingredients</a></nav>"#).unwrap();
    fs::write(root.join("blog/drafts/b.html"), "<h1>Barley</h1>").unwrap();
    fs::write(root.join("blog/c.html"), "<p>nothing to do</p>").unwrap();
    fs::write(root.join("style.css"), "body {}\n/* end */").unwrap();

    let set = PatchSet::from_str(RULES).unwrap();
    assert_eq!(set.targets(root).len(), 4);

    let dry = set.run(root, true);
    assert_eq!((dry.changed, dry.unchanged), (3, 1));
    assert_eq!(fs::read_to_string(root.join("style.css")).unwrap(), "body {}\n/* end */");

    let batch = set.run(root, false);
    assert_eq!((batch.changed, batch.unchanged, batch.missing, batch.failed), (3, 1, 0, 0));
    assert!(fs::read_to_string(root.join("blog/a.html")).unwrap().contains("Ingredient Analyzer"));
    assert_eq!(fs::read_to_string(root.join("style.css")).unwrap().matches(".callout {").count(), 1);

    let again = set.run(root, false);
    assert_eq!(again.changed, 0);
    assert_eq!(again.total(), 4);
}

#[test]
fn test_rule_files_restrict_targets() {
    let set = PatchSet::from_str(RULES).unwrap();
    let css = &set.rules[1];
    assert!(css.targets(std::path::Path::new("/site/style.css")));
    assert!(!css.targets(std::path::Path::new("/site/blog/a.html")));
}

#[test]
fn test_invalid_rule_sets() {
    assert!(PatchSet::from_str("roots = []").is_err());
    assert!(PatchSet::from_str("[[rules]]\nname = \"x\"\nreplace = \"y\"").is_err());
    assert!(PatchSet::from_str("[[rules]]\nname = \"x\"\nregex = \"(\"").is_err());
}

#[test]
fn test_missing_listed_file_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let set = PatchSet::from_str("files = [\"gone.css\"]\n[[rules]]\nname = \"x\"\nfind = \"a\"").unwrap();
    let batch = set.run(dir.path(), false);
    assert_eq!(batch.missing, 1);
}
