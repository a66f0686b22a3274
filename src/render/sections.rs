//! Body sections of an ingredient page. Each returns an empty string when
//! the record lacks the data for it.

use std::fmt::Write;

use serde_json::Value;

use crate::db::{
    AminoAcids, Category, Comparison, Faq, Ingredient, LabelGuidance, Micronutrients,
    NutritionalProfile, Position, Relationships, ScientificEvidence,
};
use crate::html::{escape, truncate_chars};
use crate::slug::{capitalize, humanize, slugify};

use super::INGREDIENTS_PATH;

/// Section anchors in page order, with the heading used in the table of
/// contents.
pub fn toc_entries(ing: &Ingredient) -> Vec<(&'static str, &'static str)> {
    let mut entries = vec![
        ("quick-summary", "Quick Summary"),
        ("what-it-is", "What It Is"),
        ("why-used", "Why It's Used"),
    ];
    if ing.nutritional_profile.is_some() {
        entries.push(("nutritional-profile", "Nutritional Profile"));
    }
    entries.push(("key-considerations", "Quality Considerations"));
    entries.push(("concerns", "Potential Concerns"));
    if ing.scientific_evidence.is_some() {
        entries.push(("scientific-evidence", "Scientific Evidence"));
    }
    if ing.label_guidance.is_some() {
        entries.push(("label-guidance", "How to Spot on Labels"));
    }
    entries.push(("watts-take", "Watts' Take"));
    entries.push(("faqs", "Frequently Asked Questions"));
    if has_blog_posts(ing.relationships.as_ref()) {
        entries.push(("related-articles", "Related Articles"));
    }
    entries.push(("related", "Related Ingredients"));
    entries
}

pub fn table_of_contents(ing: &Ingredient) -> String {
    let mut out = String::from(
        "    <div class=\"table-of-contents\">\n      <h2>Table of Contents</h2>\n      <ul>\n",
    );
    for (anchor, title) in toc_entries(ing) {
        let _ = writeln!(out, "        <li><a href=\"#{anchor}\">{title}</a></li>");
    }
    out.push_str("      </ul>\n    </div>\n");
    out
}

fn list(items: &[String]) -> String {
    let mut out = String::from("    <ul>\n");
    for item in items {
        let _ = writeln!(out, "      <li>{}</li>", escape(item));
    }
    out.push_str("    </ul>\n");
    out
}

fn common_products(category: &Category) -> &'static str {
    match category {
        Category::Protein => "Kibble, wet food, treats, protein supplements",
        Category::Carbohydrate => "Dry food, treats, grain-free formulas",
        Category::Fat => "Dry food, wet food, skin & coat supplements",
        Category::Fiber => "Weight management foods, digestive supplements",
        Category::Vitamin => "Complete foods, multivitamin supplements",
        Category::Mineral => "Complete foods, bone & joint supplements",
        Category::Active => "Joint supplements, calming treats, specialty formulas",
        Category::Preservative => "Dry food, treats, chews",
        Category::Additive => "Treats, wet food, flavor enhancers",
        Category::Produce | Category::Vegetable => "Premium kibble, freeze-dried foods, treats",
        Category::Other(_) => "Dog food, treats, and supplements",
    }
}

/// What quality and concerns paragraphs talk about when the record has
/// no expanded text: `(emphasis, concerns)`.
fn category_context(category: &Category) -> (&'static str, &'static str) {
    match category {
        Category::Carbohydrate => (
            "digestibility, glycemic index, fiber content, and grain-free alternatives",
            "grain sensitivities, blood sugar impact, and nutritional density versus simple fillers",
        ),
        Category::Fat => (
            "omega fatty acid ratios, palatability, and energy density",
            "rancidity, processing methods, and appropriate fat levels for different life stages",
        ),
        Category::Fiber => (
            "soluble versus insoluble fiber, digestive health benefits, and stool quality",
            "excessive fiber reducing nutrient absorption and causing digestive upset",
        ),
        Category::Vitamin => (
            "bioavailability, synthetic versus natural forms, and deficiency prevention",
            "proper dosing, interactions with other nutrients, and toxicity from over-supplementation",
        ),
        Category::Mineral => (
            "chelated versus inorganic forms, bioavailability, and balanced ratios with other minerals",
            "mineral imbalances, interactions, and appropriate levels for different life stages",
        ),
        Category::Active => (
            "clinical evidence, appropriate dosing, and targeted health benefits",
            "efficacy, quality of source material, and potential interactions with medications",
        ),
        Category::Preservative => (
            "natural versus synthetic options, safety profile, and effectiveness",
            "potential health impacts, regulatory approval, and consumer preferences",
        ),
        Category::Additive => (
            "functional purpose, safety testing, and nutritional contribution",
            "necessity, potential sensitivities, and whether it serves dogs or just appeals to humans",
        ),
        Category::Produce | Category::Vegetable => (
            "antioxidant content, phytonutrients, and whole food nutrition",
            "actual quantity in formulas, bioavailability for dogs, and marketing versus nutrition",
        ),
        Category::Protein | Category::Other(_) => (
            "protein density, amino acid profile, digestibility, and sourcing quality",
            "allergies, protein digestibility, and quality variations between named and generic sources",
        ),
    }
}

pub fn breadcrumbs(ing: &Ingredient) -> String {
    format!(
        "    <div class=\"breadcrumbs\">
      <a href=\"/\">Home</a>
      <span>/</span>
      <a href=\"/ingredient-analyzer/\">Ingredient Analyzer</a>
      <span>/</span>
      <a href=\"{INGREDIENTS_PATH}\">Ingredients</a>
      <span>/</span>
      <span>{}</span>
    </div>
",
        escape(&ing.name)
    )
}

pub fn hero(ing: &Ingredient, updated: &str) -> String {
    let position = ing.watts_position;
    let mut out = String::from("    <div class=\"ingredient-hero\">\n");
    let _ = writeln!(out, "      <h1>{}</h1>", escape(&ing.name));
    out.push_str("      <div class=\"ingredient-meta\">\n");
    let _ = writeln!(
        out,
        "        <div class=\"category-badge\">{}</div>",
        escape(&capitalize(ing.category.as_str()))
    );
    let _ = writeln!(
        out,
        "        <div class=\"position-badge {}\">{}</div>",
        position.badge_class(),
        position.label()
    );
    if let Some(value) = &ing.nutrition_value {
        let _ = writeln!(
            out,
            "        <div class=\"nutrition-value\">{} nutritional value</div>",
            escape(&capitalize(value))
        );
    }
    out.push_str("      </div>\n");
    let _ = writeln!(out, "      <p class=\"last-updated\">Last updated: {updated}</p>");
    out.push_str("    </div>\n");
    out
}

pub fn quick_summary(ing: &Ingredient) -> String {
    format!(
        "    <div class=\"quick-summary\" id=\"quick-summary\">
      <h2>Quick Summary</h2>
      <p><strong>{}</strong> {}</p>
    </div>
",
        escape(&ing.name),
        escape(&ing.what_it_is)
    )
}

pub fn key_facts(ing: &Ingredient) -> String {
    let aliases = if ing.aliases.is_empty() { "N/A".to_string() } else { ing.aliases.join(", ") };
    let position = ing.watts_position;
    let mark = match position {
        Position::Good => " \u{2713}",
        Position::Avoid => " \u{2717}",
        Position::Neutral | Position::Caution => "",
    };
    let facts = [
        ("Category", capitalize(ing.category.as_str())),
        ("Common In", common_products(&ing.category).to_string()),
        ("Also Known As", aliases),
    ];

    let mut out = String::from("    <div class=\"key-facts\">\n");
    for (label, value) in facts {
        let _ = write!(
            out,
            "      <div class=\"fact-item\">\n        <div class=\"fact-label\">{label}</div>\n        <div class=\"fact-value\">{}</div>\n      </div>\n",
            escape(&value)
        );
    }
    let _ = write!(
        out,
        "      <div class=\"fact-item\">\n        <div class=\"fact-label\">Watts Rating</div>\n        <div class=\"fact-value\" style=\"color: var(--{});\">{}{mark}</div>\n      </div>\n",
        position.color_var(),
        position.label()
    );
    out.push_str("    </div>\n");
    out
}

pub fn what_it_is(ing: &Ingredient) -> String {
    let text = ing
        .what_it_is_expanded
        .as_ref()
        .and_then(|w| w.overview.as_deref())
        .filter(|s| !s.is_empty())
        .or_else(|| Some(ing.what_it_is.as_str()).filter(|s| !s.is_empty()))
        .or_else(|| ing.nutritional_profile.as_ref().and_then(|p| p.function.as_deref()))
        .unwrap_or("No description available.");

    let mut out =
        format!("    <h2 id=\"what-it-is\">What It Is</h2>\n    <p>{}</p>\n", escape(text));
    out.push_str(&comparison_links(ing.comparisons()));
    out
}

/// Incomplete entries are left out; `validate` reports them.
fn comparison_links(comparisons: &[Comparison]) -> String {
    let complete: Vec<(&str, &str)> = comparisons
        .iter()
        .filter_map(|c| Some((c.ingredient.as_deref()?, c.difference.as_deref()?)))
        .collect();
    if complete.is_empty() {
        return String::new();
    }

    let mut out = String::from("    <h3>Compare to Similar Ingredients</h3>\n    <ul>\n");
    for (slug, difference) in complete {
        let slug = slugify(slug);
        let _ = writeln!(
            out,
            "      <li><strong>vs. <a href=\"{INGREDIENTS_PATH}{slug}/\">{}</a></strong>: {}</li>",
            escape(&humanize(&slug)),
            escape(difference)
        );
    }
    out.push_str("    </ul>\n");
    out
}

pub fn why_used(ing: &Ingredient) -> String {
    let mut out = String::from("    <h2 id=\"why-used\">Why It's Used in Dog Products</h2>\n");
    if let Some(expanded) = ing.why_used_expanded.as_deref().filter(|s| !s.is_empty()) {
        let _ = writeln!(out, "    <p>{}</p>", escape(expanded));
    } else {
        let _ = writeln!(
            out,
            "    <p>Manufacturers include {} in dog food, treats, and supplements for several reasons:</p>",
            escape(&ing.name.to_lowercase())
        );
        out.push_str(&list(&ing.why_used));
    }
    out
}

/// `omega3Content` → `Omega3 Content`
fn field_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() && !label.is_empty() {
            label.push(' ');
        }
        label.push(c);
    }
    capitalize(&label)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn nutritional_profile(profile: Option<&NutritionalProfile>) -> String {
    let Some(profile) = profile else {
        return String::new();
    };

    let mut out = String::from("    <h2 id=\"nutritional-profile\">Nutritional Profile</h2>\n");

    if let Some(macros) = &profile.macros {
        out.push_str("    <h3>Macronutrients</h3>\n    <ul>\n");
        let rows =
            [("Protein", &macros.protein), ("Fat", &macros.fat), ("Moisture", &macros.moisture)];
        for (label, value) in rows {
            if let Some(value) = value {
                let _ = writeln!(out, "      <li><strong>{label}:</strong> {}</li>", escape(value));
            }
        }
        out.push_str("    </ul>\n");
    }

    match &profile.micronutrients {
        Some(Micronutrients::Text(text)) => {
            let _ =
                writeln!(out, "    <p><strong>Key Micronutrients:</strong> {}</p>", escape(text));
        }
        Some(Micronutrients::Table(table)) => {
            out.push_str("    <h3>Key Micronutrients</h3>\n    <ul>\n");
            for (key, value) in table {
                let _ = writeln!(
                    out,
                    "      <li><strong>{}:</strong> {}</li>",
                    escape(&field_label(key)),
                    escape(&value_text(value))
                );
            }
            out.push_str("    </ul>\n");
        }
        None => {}
    }

    match &profile.amino_acids {
        Some(AminoAcids::List(acids)) => {
            out.push_str("    <h3>Amino Acids</h3>\n");
            out.push_str(&list(acids));
        }
        Some(AminoAcids::Text(text)) => {
            let _ = writeln!(out, "    <p><strong>Amino Acids:</strong> {}</p>", escape(text));
        }
        None => {}
    }

    if let Some(bio) = &profile.bioavailability {
        let _ = writeln!(out, "    <p><strong>Bioavailability:</strong> {}</p>", escape(bio));
    }
    out
}

pub fn quality(ing: &Ingredient) -> String {
    let qc = ing.quality_considerations.as_ref();
    let mut out = String::from("    <h2 id=\"key-considerations\">Quality Considerations</h2>\n");

    if let Some(expanded) = qc.and_then(|q| q.expanded.as_deref()) {
        let _ = writeln!(out, "    <p>{}</p>", escape(expanded));
    } else {
        let _ = writeln!(
            out,
            "    <p>When evaluating {} in dog products, it's important to understand {}. This ingredient's quality and appropriateness can vary significantly based on sourcing, processing, and the specific formula it's used in.</p>",
            escape(&ing.name.to_lowercase()),
            category_context(&ing.category).0
        );
    }

    if let Some(qc) = qc {
        if !qc.red_flags.is_empty() {
            out.push_str("    <h3>Red Flags</h3>\n");
            out.push_str(&list(&qc.red_flags));
        }
        if !qc.green_flags.is_empty() {
            out.push_str("    <h3>Green Flags</h3>\n");
            out.push_str(&list(&qc.green_flags));
        }
    }

    if !ing.quality_note.is_empty() {
        let _ = write!(
            out,
            "    <div class=\"quality-note-box\">\n      <div class=\"quality-note-label\">Quality Note</div>\n      <p>{}</p>\n    </div>\n",
            escape(&ing.quality_note)
        );
    }
    out
}

pub fn concerns(ing: &Ingredient) -> String {
    let ce = ing.concerns_expanded.as_ref();
    let mut out = String::from("    <h2 id=\"concerns\">Potential Concerns</h2>\n");

    if let Some(detailed) = ce.and_then(|c| c.detailed.as_deref()) {
        let _ = writeln!(out, "    <p>{}</p>", escape(detailed));
    } else {
        let _ = writeln!(
            out,
            "    <p>While {} can be appropriate in dog nutrition, pet owners should be aware of {}. Individual dogs may respond differently to the same ingredient based on their health status, age, and sensitivities.</p>",
            escape(&ing.name.to_lowercase()),
            category_context(&ing.category).1
        );
    }

    if let Some(ce) = ce {
        if !ce.contraindications.is_empty() {
            out.push_str("    <h3>Contraindications</h3>\n");
            out.push_str(&list(&ce.contraindications));
        }
        if let Some(life) = &ce.life_stage_considerations {
            let _ = writeln!(
                out,
                "    <p><strong>Life Stage Considerations:</strong> {}</p>",
                escape(life)
            );
        }
    }
    out
}

pub fn scientific_evidence(ing: &Ingredient) -> String {
    let Some(evidence) = &ing.scientific_evidence else {
        return String::new();
    };
    evidence_section(evidence, ing)
}

fn evidence_section(evidence: &ScientificEvidence, ing: &Ingredient) -> String {
    let mut out = format!(
        "    <h2 id=\"scientific-evidence\">Scientific Evidence</h2>\n    <p>{}</p>\n",
        escape(&evidence.summary)
    );

    if !evidence.key_studies.is_empty() {
        out.push_str("    <h3>Key Research Findings</h3>\n    <ul>\n");
        for study in &evidence.key_studies {
            let _ = write!(
                out,
                "      <li><strong>{}</strong> ({})",
                escape(&study.finding),
                escape(&study.source)
            );
            let url = study
                .citation_index
                .and_then(|i| ing.citations.get(i))
                .and_then(|c| c.url.as_deref());
            if let Some(url) = url {
                let _ = write!(
                    out,
                    " <a href=\"{}\" target=\"_blank\" rel=\"noopener\">[Source]</a>",
                    escape(url)
                );
            }
            out.push_str("</li>\n");
        }
        out.push_str("    </ul>\n");
    }

    if let Some(level) = &evidence.evidence_level {
        let _ = writeln!(out, "    <p><strong>Evidence Level:</strong> {}</p>", escape(level));
    }
    out
}

pub fn label_guidance(guidance: Option<&LabelGuidance>) -> String {
    let Some(guidance) = guidance else {
        return String::new();
    };

    let mut out = String::from(
        "    <h2 id=\"label-guidance\">How to Spot on Labels</h2>\n    <p>Reading ingredient labels can be confusing. Here's how to identify and evaluate this ingredient:</p>\n",
    );
    if !guidance.how_to_spot.is_empty() {
        out.push_str("    <h3>What to Look For</h3>\n");
        out.push_str(&list(&guidance.how_to_spot));
    }
    if !guidance.synonyms_to_know.is_empty() {
        out.push_str("    <h3>Alternative Names</h3>\n    <p>This ingredient may also appear as:</p>\n");
        out.push_str(&list(&guidance.synonyms_to_know));
    }
    if let Some(position) = &guidance.typical_position {
        let _ = writeln!(out, "    <p><strong>Typical Position:</strong> {}</p>", escape(position));
    }
    out
}

pub fn watts_take(ing: &Ingredient) -> String {
    format!(
        "    <div class=\"watts-take-box\" id=\"watts-take\">
      <div class=\"watts-take-label\">Watts' Take</div>
      <p>{}</p>
    </div>
",
        escape(&ing.watts_take)
    )
}

pub fn faqs(faqs: &[Faq]) -> String {
    let mut out = String::from("    <h2 id=\"faqs\">Frequently Asked Questions</h2>\n");
    for faq in faqs {
        let _ = write!(
            out,
            "    <div class=\"faq-item\">\n      <h3>{}</h3>\n      <p>{}</p>\n    </div>\n",
            escape(&faq.question),
            escape(&faq.answer)
        );
    }
    out
}

fn has_blog_posts(rel: Option<&Relationships>) -> bool {
    rel.is_some_and(|r| !r.related_blog_posts.is_empty())
}

fn blog_title(slug: &str) -> String {
    let known = match slug {
        "beef-liver-for-dogs" => "Beef Liver for Dogs: Complete Guide",
        "organ-based-nutrition-for-dogs" => "Organ-Based Nutrition for Dogs",
        "whole-food-vs-synthetic-nutrients" => "Whole Food vs Synthetic Nutrients",
        "protein-for-dogs" => "Protein for Dogs: Complete Guide",
        "zinc-for-dogs" => "Zinc for Dogs: Benefits and Sources",
        "immune-support-for-dogs" => "Immune Support for Dogs",
        "gut-health-for-dogs" => "Gut Health for Dogs",
        "antioxidants-for-dogs" => "Antioxidants for Dogs",
        "bone-broth-for-dogs" => "Bone Broth for Dogs",
        "spirulina-for-dogs" => "Spirulina for Dogs",
        _ => return capitalize(&humanize(slug)),
    };
    known.to_string()
}

pub fn related_articles(rel: Option<&Relationships>) -> String {
    let Some(rel) = rel.filter(|r| !r.related_blog_posts.is_empty()) else {
        return String::new();
    };

    let mut out = String::from(
        "    <h2 id=\"related-articles\">Related Articles</h2>\n    <div class=\"related-grid\">\n",
    );
    for slug in &rel.related_blog_posts {
        let slug = slugify(slug);
        let _ = write!(
            out,
            "      <a href=\"/blog/{slug}.html\" class=\"related-card\">\n        <h3>{}</h3>\n        <p>Learn more about this topic</p>\n      </a>\n",
            escape(&blog_title(&slug))
        );
    }
    out.push_str("    </div>\n");
    out
}

pub fn related_ingredients(related: &[&Ingredient]) -> String {
    let mut out = String::from(
        "    <h2 id=\"related\">Related Ingredients</h2>\n    <div class=\"related-grid\">\n",
    );
    for other in related {
        let _ = write!(
            out,
            "      <a href=\"{INGREDIENTS_PATH}{}/\" class=\"related-card\">\n        <h3>{}</h3>\n        <p>{}...</p>\n      </a>\n",
            other.slug(),
            escape(&other.name),
            escape(truncate_chars(&other.what_it_is, 100))
        );
    }
    out.push_str("    </div>\n");
    out
}

pub const CTA: &str = "    <div class=\"cta-section\">
      <h3>Analyze Your Dog's Food</h3>
      <p>Want to know what's really in your dog's food, treats, or supplements? Paste the ingredient list to get instant analysis.</p>
      <a href=\"/ingredient-analyzer/\" class=\"cta-button\">Try the Analyzer Tool</a>
    </div>
";
