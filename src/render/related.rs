use crate::db::Ingredient;

const MAX_RELATED: usize = 6;
/// Same-category cap when a record names no pairings, leaving room for
/// neighbouring categories.
const SAME_CATEGORY_WITHOUT_PAIRINGS: usize = 4;

/// Explicit pairings first, then the same category, then neighbouring
/// categories. Never includes the ingredient itself or a repeat.
pub fn related_ingredients<'a>(ing: &Ingredient, all: &'a [Ingredient]) -> Vec<&'a Ingredient> {
    let mut related: Vec<&Ingredient> = Vec::with_capacity(MAX_RELATED);
    let taken = |related: &[&Ingredient], candidate: &Ingredient| {
        candidate.name == ing.name || related.iter().any(|r| r.name == candidate.name)
    };

    let pairings = ing.relationships.as_ref().map_or(&[][..], |r| r.often_paired_with.as_slice());
    for slug in pairings {
        if related.len() == MAX_RELATED {
            return related;
        }
        if let Some(found) = all.iter().find(|c| c.slug() == *slug)
            && !taken(&related, found)
        {
            related.push(found);
        }
    }

    let same_cap = if pairings.is_empty() { SAME_CATEGORY_WITHOUT_PAIRINGS } else { MAX_RELATED };
    for candidate in all.iter().filter(|c| c.category == ing.category) {
        if related.len() >= same_cap {
            break;
        }
        if !taken(&related, candidate) {
            related.push(candidate);
        }
    }

    for category in ing.category.neighbours() {
        for candidate in all.iter().filter(|c| c.category == *category) {
            if related.len() >= MAX_RELATED {
                return related;
            }
            if !taken(&related, candidate) {
                related.push(candidate);
            }
        }
    }

    related
}
