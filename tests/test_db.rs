use larder::db::*;
use serde_json::json;

fn record(name: &str, category: &str) -> serde_json::Value {
    json!({
        "name": name,
        "category": category,
        "whatItIs": format!("{name} is an ingredient."),
        "whyUsed": ["flavor"],
        "qualityNote": "",
        "wattsPosition": "neutral",
        "wattsTake": ""
    })
}

fn database(records: Vec<serde_json::Value>) -> Database {
    Database::from_json(&json!({ "ingredients": records }).to_string()).unwrap()
}

#[test]
fn test_add_aliases_creates_list() {
    let mut db = database(vec![record("Melatonin", "active")]);
    let added = db.add_aliases("Melatonin", &["melatonin supplement".to_string()]).unwrap();
    assert_eq!(added, vec!["melatonin supplement"]);
    assert_eq!(db.find("Melatonin").unwrap().aliases, vec!["melatonin supplement"]);
}

#[test]
fn test_add_aliases_is_idempotent() {
    let mut db = database(vec![record("Melatonin", "active")]);
    let aliases =
        vec!["melatonin supplement".to_string(), "n-acetyl-5-methoxytryptamine".to_string()];
    db.add_aliases("Melatonin", &aliases).unwrap();
    let again = db.add_aliases("Melatonin", &aliases).unwrap();
    assert!(again.is_empty());
    assert_eq!(db.find("Melatonin").unwrap().aliases.len(), 2);
}

#[test]
fn test_add_aliases_unknown_name() {
    let mut db = database(vec![record("Melatonin", "active")]);
    let err = db.add_aliases("Melatonine", &["x".to_string()]).unwrap_err();
    assert_eq!(err, ValidationError::UnknownName("Melatonine".to_string()));
}

#[test]
fn test_remove_aliases_reports_present_only() {
    let mut db = database(vec![record("Kelp", "mineral")]);
    db.add_aliases("Kelp", &["seaweed".to_string()]).unwrap();
    let removed = db.remove_aliases("Kelp", &["seaweed".to_string(), "algae".to_string()]).unwrap();
    assert_eq!(removed, vec!["seaweed"]);
    assert!(db.find("Kelp").unwrap().aliases.is_empty());
}

#[test]
fn test_insert_sorted_position() {
    let mut db = database(vec![record("Apple", "produce"), record("Carrot", "vegetable")]);
    let ing: Ingredient = serde_json::from_value(record("Banana", "produce")).unwrap();
    assert_eq!(db.insert_sorted(ing).unwrap(), 1);
    let names: Vec<&str> = db.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Apple", "Banana", "Carrot"]);
}

#[test]
fn test_insert_sorted_rejects_duplicate() {
    let mut db = database(vec![record("Apple", "produce")]);
    let ing: Ingredient = serde_json::from_value(record("Apple", "produce")).unwrap();
    assert!(matches!(db.insert_sorted(ing), Err(ValidationError::DuplicateName(_))));
}

#[test]
fn test_validate_duplicate_alias_and_fix() {
    let mut db = database(vec![record("Kelp", "mineral")]);
    db.ingredients[0].aliases = vec!["seaweed".to_string(), "seaweed".to_string()];
    assert!(!db.validate().is_ok());
    assert_eq!(db.dedupe_aliases(), 1);
    assert!(db.validate().is_ok());
}

#[test]
fn test_validate_slug_collision() {
    let db = database(vec![record("Fish Oil", "fat"), record("Fish-Oil", "fat")]);
    let report = db.validate();
    assert!(report.errors.iter().any(|e| matches!(e, ValidationError::SlugCollision { .. })));
}

#[test]
fn test_unknown_category_is_a_warning() {
    let db = database(vec![record("Mystery", "spice")]);
    let report = db.validate();
    assert!(report.is_ok());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(db.ingredients[0].category, Category::Other("spice".to_string()));
}

#[test]
fn test_remove_record() {
    let mut db = database(vec![record("Apple", "produce"), record("Heart", "protein")]);
    assert_eq!(db.remove("Heart").map(|i| i.name), Some("Heart".to_string()));
    assert!(db.remove("Heart").is_none());
    assert_eq!(db.ingredients.len(), 1);
}

#[test]
fn test_save_keeps_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ingredients.json");
    let mut rec = record("Apple", "produce");
    rec["customNote"] = json!("keep me");
    let db =
        Database::from_json(&json!({ "version": 2, "ingredients": [rec] }).to_string()).unwrap();
    db.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.ends_with('\n'));
    assert!(text.contains("\"customNote\": \"keep me\""));
    let back = Database::open(&path).unwrap();
    assert_eq!(back.extra.get("version"), Some(&json!(2)));
    assert_eq!(back.find_by_slug("apple").map(|i| i.name.as_str()), Some("Apple"));
}

#[test]
fn test_malformed_json_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ingredients.json");
    std::fs::write(&path, "{\"ingredients\": [").unwrap();
    assert!(Database::read(&path).is_err());
}

const SQUASH_FILE: &str = r#"{
  "version": "2.0",
  "ingredients": [
    {
      "name": "Squash",
      "category": "produce",
      "aliases": [],
      "whatItIs": "A winter squash.",
      "whyUsed": [
        "fiber"
      ],
      "qualityNote": "",
      "wattsPosition": "good",
      "wattsTake": "Fine.",
      "citations": []
    }
  ],
  "updated": "2026-01-25"
}
"#;

#[test]
fn test_rewrite_is_byte_for_byte() {
    let db = Database::from_json(SQUASH_FILE).unwrap();
    assert_eq!(db.to_json().unwrap(), SQUASH_FILE);
}

#[test]
fn test_edit_keeps_layout() {
    let mut db = Database::from_json(SQUASH_FILE).unwrap();
    db.add_aliases("Squash", &["butternut".to_string()]).unwrap();
    let expected = SQUASH_FILE.replace(
        "\"aliases\": [],",
        "\"aliases\": [\n        \"butternut\"\n      ],",
    );
    assert_eq!(db.to_json().unwrap(), expected);

    db.remove_aliases("Squash", &["butternut".to_string()]).unwrap();
    assert_eq!(db.to_json().unwrap(), SQUASH_FILE);
}
