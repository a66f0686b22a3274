//! `<title>` and meta description for ingredient pages.

use crate::db::Ingredient;

/// End in `s` but name one thing.
const SINGULAR_ENDINGS: [&str; 17] = [
    "asparagus",
    "citrus",
    "grass",
    "yeast",
    "rice",
    "moss",
    "acidophilus",
    "faecium",
    "coagulans",
    "animalis",
    "lactis",
    "lupus",
    "status",
    "virus",
    "focus",
    "mucus",
    "phosphorus",
];

/// Plural without the trailing `s`.
const PLURAL_WORDS: [&str; 1] = ["poultry"];

const MASS_NOUN_ENDINGS: [&str; 9] =
    ["ness", "ous", "us", "oil", "meal", "flour", "extract", "digest", "concentrate"];

pub fn is_plural(name: &str) -> bool {
    let lower = name.to_lowercase();

    if PLURAL_WORDS.iter().any(|w| lower.contains(w)) {
        return true;
    }
    if SINGULAR_ENDINGS.iter().any(|w| lower.ends_with(w)) {
        return false;
    }
    if MASS_NOUN_ENDINGS.iter().any(|w| lower.ends_with(w)) {
        return false;
    }
    if lower.ends_with("ies") {
        return !lower.ends_with("calories");
    }
    lower.ends_with('s')
}

/// Shorter names get the full question, longer ones lose words to stay
/// near 60 characters.
pub fn page_title(name: &str, brand: &str) -> String {
    let len = name.chars().count();
    if len <= 20 {
        let question = if is_plural(name) { "Are They Safe?" } else { "Is It Safe?" };
        format!("{name} in Dog Food: {question} | {brand}")
    } else if len <= 28 {
        format!("{name} in Dog Food: Safe? | {brand}")
    } else {
        format!("{name} in Dog Food | {brand}")
    }
}

pub fn meta_description(ingredient: &Ingredient) -> String {
    if let Some(desc) =
        ingredient.seo_metadata.as_ref().and_then(|s| s.meta_description.as_deref())
    {
        return desc.to_string();
    }
    format!(
        "Is {} safe for dogs? Learn about nutritional benefits, safety considerations, quality indicators & expert analysis. Complete guide.",
        ingredient.name.to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_plural_rules() {
        assert!(is_plural("Blueberries"));
        assert!(is_plural("Poultry By-Product Meal"));
        assert!(is_plural("Anchovies"));
        assert!(!is_plural("Brown Rice"));
        assert!(!is_plural("Salmon Oil"));
        assert!(!is_plural("Lactobacillus Acidophilus"));
        assert!(!is_plural("Chicken"));
    }

    #[test]
    fn test_page_title_by_length() {
        assert_eq!(page_title("Chicken", "Watts"), "Chicken in Dog Food: Is It Safe? | Watts");
        assert_eq!(page_title("Carrots", "Watts"), "Carrots in Dog Food: Are They Safe? | Watts");
        assert_eq!(
            page_title("Dehydrated Whitefish Meal", "Watts"),
            "Dehydrated Whitefish Meal in Dog Food: Safe? | Watts"
        );
        assert_eq!(
            page_title("Hydrolyzed Chicken Liver Digest", "Watts"),
            "Hydrolyzed Chicken Liver Digest in Dog Food | Watts"
        );
    }
}
