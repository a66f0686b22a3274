//! schema.org JSON-LD, built as values and serialized, never spliced.

use serde_json::{Value, json};

use crate::db::{Faq, Ingredient};
use crate::html;

use super::{ANALYZER_PATH, INGREDIENTS_PATH};

fn organization(brand: &str) -> Value {
    json!({ "@type": "Organization", "name": format!("{brand} Pet") })
}

pub fn article(ing: &Ingredient, base_url: &str, brand: &str, date: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": format!("{} in Dog Food: Is It Safe for Dogs?", ing.name),
        "description": ing.what_it_is,
        "author": organization(brand),
        "publisher": {
            "@type": "Organization",
            "name": format!("{brand} Pet"),
            "logo": { "@type": "ImageObject", "url": format!("{base_url}/favicon.svg") }
        },
        "datePublished": date,
        "dateModified": date,
    })
}

pub fn breadcrumbs(ing: &Ingredient, base_url: &str) -> Value {
    let crumbs = [
        ("Home", format!("{base_url}/")),
        ("Ingredient Analyzer", format!("{base_url}{ANALYZER_PATH}")),
        ("Ingredients", format!("{base_url}{INGREDIENTS_PATH}")),
        (ing.name.as_str(), format!("{base_url}{INGREDIENTS_PATH}{}/", ing.slug())),
    ];
    let items: Vec<Value> = crumbs
        .iter()
        .enumerate()
        .map(|(i, (name, item))| {
            json!({ "@type": "ListItem", "position": i + 1, "name": name, "item": item })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

pub fn faq_page(faqs: &[Faq]) -> Value {
    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": faq.answer }
            })
        })
        .collect();
    json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    })
}

pub fn collection_page(base_url: &str, brand: &str, count: usize) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "CollectionPage",
        "name": "Dog Food Ingredient Encyclopedia",
        "description": format!("Comprehensive encyclopedia of {count} dog food, treat, and supplement ingredients"),
        "url": format!("{base_url}{INGREDIENTS_PATH}"),
        "publisher": organization(brand),
    })
}

/// A complete `<script>` element holding `value`.
pub fn script(value: &Value) -> String {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    format!("<script type=\"application/ld+json\">\n{}\n</script>", html::escape_json_ld(&json))
}
