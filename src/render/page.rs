use crate::config::Config;
use crate::date::Date;
use crate::db::{Faq, Ingredient};
use crate::html::truncate_chars;

use super::chrome::{self, Head};
use super::{INGREDIENTS_PATH, faq, related, schema, sections, title};

/// `lastUpdated` in either ISO or long form, else the configured default.
pub fn page_date(ing: &Ingredient, config: &Config) -> Option<Date> {
    ing.last_updated
        .as_deref()
        .and_then(|s| Date::parse(s).or_else(|| Date::parse_long(s)))
        .or_else(|| Date::parse(&config.site.default_date))
}

/// Record FAQs by priority (unprioritized last), else generated ones.
pub fn page_faqs(ing: &Ingredient) -> Vec<Faq> {
    if ing.faqs.is_empty() {
        return faq::generate(ing);
    }
    let mut faqs = ing.faqs.clone();
    faqs.sort_by_key(|f| f.priority.unwrap_or(99));
    faqs
}

/// A complete ingredient document.
pub fn render(ing: &Ingredient, all: &[Ingredient], config: &Config) -> String {
    let site = &config.site;
    let base = site.base_url.as_str();
    let slug = ing.slug();
    let canonical = format!("{base}{INGREDIENTS_PATH}{slug}/");

    let date = page_date(ing, config);
    let iso = date.map_or_else(|| site.default_date.clone(), Date::to_iso);
    let long = date.map_or_else(|| site.default_date.clone(), Date::to_long);

    let faqs = page_faqs(ing);
    let related = related::related_ingredients(ing, all);

    let page_title = title::page_title(&ing.name, &site.brand);
    let description = title::meta_description(ing);
    let og_title = format!("{} in Dog Food: Complete Guide | {} Pet", ing.name, site.brand);
    let og_source = ing
        .what_it_is_expanded
        .as_ref()
        .and_then(|w| w.overview.as_deref())
        .unwrap_or(&ing.what_it_is);
    let json_ld = [
        schema::script(&schema::article(ing, base, &site.brand, &iso)),
        schema::script(&schema::breadcrumbs(ing, base)),
        schema::script(&schema::faq_page(&faqs)),
    ];

    let head = Head {
        title: &page_title,
        description: &description,
        canonical: &canonical,
        og_title: Some(&og_title),
        og_description: Some(truncate_chars(og_source, 150)),
        json_ld: &json_ld,
    };

    let mut out = head.render();
    out.push_str("<body>\n");
    out.push_str(&chrome::header(&site.brand));
    out.push_str("\n  <main>\n");
    out.push_str(&sections::breadcrumbs(ing));
    out.push_str(&sections::hero(ing, &long));
    out.push_str(&sections::table_of_contents(ing));
    out.push_str(&sections::quick_summary(ing));
    out.push_str(&sections::key_facts(ing));
    out.push_str(&sections::what_it_is(ing));
    out.push_str(&sections::why_used(ing));
    out.push_str(&sections::nutritional_profile(ing.nutritional_profile.as_ref()));
    out.push_str(&sections::quality(ing));
    out.push_str(&sections::concerns(ing));
    out.push_str(&sections::scientific_evidence(ing));
    out.push_str(&sections::label_guidance(ing.label_guidance.as_ref()));
    out.push_str(&sections::watts_take(ing));
    out.push_str(&sections::faqs(&faqs));
    out.push_str(&sections::related_articles(ing.relationships.as_ref()));
    out.push_str(&sections::related_ingredients(&related));
    out.push_str(sections::CTA);
    out.push_str("  </main>\n\n");
    out.push_str(&chrome::footer(&site.brand, &format!("info@{}", site.host)));
    out.push('\n');
    out.push_str(chrome::MENU_SCRIPT);
    out.push_str("</body>\n</html>\n");
    out
}
