//! FAQs for records that don't carry their own.

use crate::db::{Category, Faq, Ingredient, Position};

const MAX_FAQS: usize = 6;

const GRAINS: [&str; 5] = ["rice", "wheat", "corn", "barley", "oat"];

/// Two generic questions, then category-specific ones, capped at six.
pub fn generate(ing: &Ingredient) -> Vec<Faq> {
    let name = ing.name.as_str();
    let lower = name.to_lowercase();
    let profile = ing.nutritional_profile.as_ref();

    let context = if ing.category == Category::Protein { "food" } else { "products" };
    let mut faqs = vec![
        Faq::new(format!("Is {lower} safe for dogs?"), safety_answer(ing)),
        Faq::new(format!("What does {lower} do in dog {context}?"), function_answer(ing)),
    ];

    match &ing.category {
        Category::Fat => {
            let named = !lower.contains("animal fat") && !lower.contains("poultry fat");
            let better = if named {
                format!(
                    "Named fat sources like {lower} are generally superior to generic \"animal fat\" because they provide transparency about the source and consistent quality. The quality of any fat depends on its fatty acid profile, omega-6 to omega-3 ratio, preservation method, and source animal health. {name} offers traceability that generic fats cannot match."
                )
            } else {
                "The quality of any fat depends on its fatty acid profile, omega-6 to omega-3 ratio, and preservation method. Named fat sources (like chicken fat or beef tallow) are generally preferred because they provide transparency about the source and consistent quality.".to_string()
            };
            faqs.push(Faq::new(format!("Is {lower} better than other fats in dog food?"), better));
            faqs.push(Faq::new(
                format!("How should {lower} be preserved in dog food?"),
                "Fats and oils in dog food must be preserved to prevent rancidity and oxidation. Natural preservatives like mixed tocopherols (vitamin E) and rosemary extract are preferred over synthetic preservatives like BHA and BHT. Check the ingredient label for \"preserved with\" statements to identify which preservatives are used.",
            ));

            let ratio = profile.and_then(|p| p.omega6_to_omega3.as_deref());
            let has_fatty_acids = profile.is_some_and(|p| p.fatty_acid_profile.is_some());
            if ratio.is_some() || has_fatty_acids {
                let high_omega6 = ratio.is_some_and(|r| {
                    r.contains("high") || r.contains("20:1") || r.contains("10:1")
                });
                let answer = if high_omega6 {
                    format!(
                        "{name} has a high omega-6 to omega-3 ratio, which means it provides minimal omega-3 fatty acids. For optimal nutrition and to support anti-inflammatory benefits, dog foods containing {lower} should be supplemented with omega-3 sources like fish oil, algal oil, or flaxseed oil to balance the fatty acid profile."
                    )
                } else {
                    format!(
                        "Like most fats, {lower} provides fatty acids that support energy, palatability, and nutrient absorption. Check the guaranteed analysis to see the omega-3 content, as land animal fats are typically lower in omega-3s compared to fish-based fats like salmon oil or menhaden oil."
                    )
                };
                faqs.push(Faq::new(format!("Does {lower} provide omega-3 fatty acids?"), answer));
            }

            faqs.push(Faq::new(
                "How much fat should be in dog food?",
                "Adult dog foods typically contain 12-18% fat, while puppy and performance formulas may have 18-25% fat or more. The AAFCO minimum is 5.5% for adult maintenance and 8.5% for growth and reproduction. The optimal amount depends on your dog's age, activity level, and individual metabolism.",
            ));
        }
        Category::Protein => {
            faqs.push(Faq::new(
                format!("Can {lower} cause allergies in dogs?"),
                "Any protein source can potentially trigger allergies in sensitive dogs. Signs of food allergies include itchy skin, ear infections, digestive issues, and excessive paw licking. If your dog shows these symptoms, consult your veterinarian about an elimination diet to identify the trigger ingredient.",
            ));
            faqs.push(Faq::new(
                format!("How much {lower} should be in dog food?"),
                format!(
                    "Quality dog foods typically list primary protein sources like {lower} within the first 3-5 ingredients. The exact percentage varies by formula, but protein-focused foods generally contain 25-35% total protein for adults, and 28-40% for puppies or performance dogs. Check the guaranteed analysis rather than relying solely on ingredient order."
                ),
            ));
        }
        Category::Carbohydrate => {
            let answer = if GRAINS.iter().any(|g| lower.contains(g)) {
                format!(
                    "No, {lower} is a grain. However, grains aren't inherently bad for dogs. Most dogs digest grains well unless they have specific grain allergies or sensitivities."
                )
            } else {
                format!(
                    "Yes, {lower} is a grain-free carbohydrate source. It's commonly used in grain-free formulas as an alternative to traditional grains."
                )
            };
            faqs.push(Faq::new(format!("Is {lower} grain-free?"), answer));
        }
        Category::Vitamin | Category::Mineral => {
            faqs.push(Faq::new(
                format!("Can dogs get too much {lower}?"),
                "Yes, excessive amounts of vitamins and minerals can cause health issues. However, properly formulated dog foods and supplements are designed to provide appropriate levels. Toxicity typically only occurs from over-supplementation or improper dosing. Always follow feeding guidelines and consult your vet before adding supplements.",
            ));
            faqs.push(Faq::new(
                format!("Is {lower} natural or synthetic?"),
                format!(
                    "{name} in dog food and supplements can be either natural or synthetic. Both forms can be effective, though bioavailability may differ. Premium brands often specify the form used. Natural sources may be more expensive but aren't necessarily superior. What matters most is the total amount and how well your dog absorbs it."
                ),
            ));
        }
        Category::Preservative | Category::Additive => {
            let first_reason = ing.why_used.first().map_or("", String::as_str);
            faqs.push(Faq::new(
                format!("Why is {lower} added to dog food?"),
                format!(
                    "{first_reason} While some additives serve important functional purposes (preservation, texture, stability), others are primarily for human appeal. {}",
                    ing.watts_take
                )
                .trim()
                .to_string(),
            ));
            faqs.push(Faq::new(
                format!("Are there natural alternatives to {lower}?"),
                "Many modern dog foods use natural alternatives like mixed tocopherols (vitamin E), rosemary extract, or citric acid instead of synthetic additives. Check ingredient labels for \"preserved with...\" statements to see which preservatives are used.",
            ));
        }
        _ => {}
    }

    faqs.truncate(MAX_FAQS);
    faqs
}

fn safety_answer(ing: &Ingredient) -> String {
    let name = &ing.name;
    match ing.watts_position {
        Position::Avoid => {
            let note =
                if ing.quality_note.is_empty() { &ing.watts_take } else { &ing.quality_note };
            format!("{name} should be used with caution or avoided. {note}").trim().to_string()
        }
        Position::Caution => {
            let mut answer =
                format!("{name} is generally recognized as safe but has some concerns.");
            if !ing.quality_note.is_empty() {
                answer.push(' ');
                answer.push_str(&ing.quality_note);
            }
            answer.push_str(
                " Monitor your dog for any adverse reactions when first introducing products containing this ingredient.",
            );
            answer
        }
        Position::Good | Position::Neutral => {
            let mut answer = format!(
                "Yes, {} is safe for dogs when used appropriately in properly formulated dog food.",
                name.to_lowercase()
            );
            if let Some(safety) =
                ing.nutritional_profile.as_ref().and_then(|p| p.safety.as_deref())
            {
                answer.push(' ');
                answer.push_str(safety);
            }
            answer.push_str(
                " As with any ingredient, individual dogs may have sensitivities, so monitor for any adverse reactions when first introducing products containing this ingredient.",
            );
            answer
        }
    }
}

fn function_answer(ing: &Ingredient) -> String {
    let primary = ing
        .nutritional_profile
        .as_ref()
        .and_then(|p| p.function.as_deref())
        .unwrap_or(&ing.what_it_is);

    let mut answer = primary.to_string();
    if !answer.is_empty() && !answer.ends_with('.') {
        answer.push('.');
    }

    let reasons: Vec<String> = ing.why_used.iter().take(2).map(|r| infinitive(r)).collect();
    if !reasons.is_empty() {
        if !answer.is_empty() {
            answer.push(' ');
        }
        answer.push_str(&format!(
            "Dog food manufacturers include this ingredient to {}.",
            reasons.join(" and ")
        ));
    }
    answer
}

/// "Provides energy" → "provide energy"; bare noun phrases get "provide".
fn infinitive(reason: &str) -> String {
    const VERBS: [(&str, &str); 5] = [
        ("provides ", "provide "),
        ("improves ", "improve "),
        ("adds ", "add "),
        ("supports ", "support "),
        ("enhances ", "enhance "),
    ];
    const BASE: [&str; 6] = ["provide", "improve", "add", "support", "enhance", "serve"];

    let lower = reason.to_lowercase();
    for (third_person, base) in VERBS {
        if let Some(rest) = lower.strip_prefix(third_person) {
            return format!("{base}{rest}");
        }
    }
    if BASE.iter().any(|b| lower.starts_with(b)) {
        lower
    } else {
        format!("provide {lower}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinitive_forms() {
        assert_eq!(infinitive("Provides energy"), "provide energy");
        assert_eq!(infinitive("High-energy fat source"), "provide high-energy fat source");
        assert_eq!(infinitive("serves as binder"), "serves as binder");
    }
}
