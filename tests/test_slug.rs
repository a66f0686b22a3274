use larder::slug::*;

#[test]
fn test_slugify_hyphenated_name() {
    assert_eq!(slugify("Green-Lipped Mussel"), "green-lipped-mussel");
}

#[test]
fn test_slugify_collapses_punctuation() {
    assert_eq!(slugify("  Omega-3 & Omega-6  "), "omega-3-omega-6");
}

#[test]
fn test_slugify_charset_and_edges() {
    for name in ["Beef Liver", "L-Carnitine", "Fish Oil!", "--odd--", "Açaí Berry"] {
        let slug = slugify(name);
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug}");
    }
}

#[test]
fn test_capitalize_and_humanize() {
    assert_eq!(capitalize("vegetable"), "Vegetable");
    assert_eq!(capitalize(""), "");
    assert_eq!(humanize("beef-liver"), "beef liver");
}
