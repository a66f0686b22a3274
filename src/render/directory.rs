//! The encyclopedia index: every ingredient as a crawlable card.

use std::fmt::Write;

use crate::config::Config;
use crate::db::{Database, Ingredient};
use crate::html::{escape, truncate_chars};
use crate::slug::capitalize;

use super::chrome::{self, Head};
use super::{INGREDIENTS_PATH, schema};

const DESCRIPTION_CHARS: usize = 120;

const FILTERS: [(&str, &str); 11] = [
    ("all", "All"),
    ("protein", "Protein"),
    ("carbohydrate", "Carbohydrate"),
    ("fat", "Fat"),
    ("fiber", "Fiber"),
    ("vitamin", "Vitamins"),
    ("mineral", "Minerals"),
    ("active", "Active Ingredients"),
    ("preservative", "Preservatives"),
    ("additive", "Additives"),
    ("produce", "Produce"),
];

pub fn card(ing: &Ingredient) -> String {
    let position = ing.watts_position;
    format!(
        "          <a href=\"{INGREDIENTS_PATH}{slug}/\" class=\"ingredient-card\" data-category=\"{category}\" data-position=\"{position}\">
            <div class=\"ingredient-card-header\">
              <h2>{name}</h2>
              <div class=\"position-badge {badge}\">{label}</div>
            </div>
            <div class=\"ingredient-category\">{category_label}</div>
            <p class=\"ingredient-description\">{description}...</p>
          </a>
",
        slug = ing.slug(),
        category = escape(ing.category.as_str()),
        name = escape(&ing.name),
        badge = position.badge_class(),
        label = position.label(),
        category_label = escape(&capitalize(ing.category.as_str())),
        description = escape(truncate_chars(&ing.what_it_is, DESCRIPTION_CHARS)),
    )
}

/// Cards sorted case-insensitively by name.
pub fn render(db: &Database, config: &Config) -> String {
    let site = &config.site;
    let mut sorted: Vec<&Ingredient> = db.ingredients.iter().collect();
    sorted.sort_by_cached_key(|i| i.name.to_lowercase());

    let count = sorted.len();
    let canonical = format!("{}{INGREDIENTS_PATH}", site.base_url);
    let title = format!(
        "Dog Food Ingredient Encyclopedia | {count} Ingredients Explained | {} Pet",
        site.brand
    );
    let description = format!(
        "Comprehensive encyclopedia of {count} dog food, treat, and supplement ingredients. Learn what each ingredient is, why it's used, and whether it's good for your dog."
    );
    let json_ld = [schema::script(&schema::collection_page(&site.base_url, &site.brand, count))];
    let head = Head {
        title: &title,
        description: &description,
        canonical: &canonical,
        og_title: None,
        og_description: None,
        json_ld: &json_ld,
    };

    let mut out = head.render();
    out.push_str("<body>\n");
    out.push_str(&chrome::header(&site.brand));
    out.push_str("\n  <main>\n    <h1>Dog Food Ingredient Encyclopedia</h1>\n");
    let _ = writeln!(
        out,
        "    <p class=\"intro\">Explore our database of {count} dog food, treat, and supplement ingredients. Learn what each ingredient really is, why manufacturers use it, and whether it provides real nutrition or just cheap filler.</p>"
    );
    out.push_str(
        "    <div class=\"controls\">\n      <input type=\"text\" id=\"searchBox\" class=\"search-box\" placeholder=\"Search ingredients...\">\n      <div class=\"filter-tabs\">\n",
    );
    for (i, (category, label)) in FILTERS.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        let _ = writeln!(
            out,
            "        <button class=\"filter-tab{active}\" data-category=\"{category}\">{label}</button>"
        );
    }
    out.push_str("      </div>\n    </div>\n\n    <div id=\"ingredientGrid\" class=\"ingredient-grid\">\n");
    for ing in &sorted {
        out.push_str(&card(ing));
    }
    out.push_str(
        "    </div>\n\n    <div id=\"noResults\" class=\"no-results hidden\">\n      <p>No ingredients found matching your search.</p>\n    </div>\n  </main>\n\n",
    );
    out.push_str(&chrome::footer(&site.brand, &format!("info@{}", site.host)));
    out.push('\n');
    out.push_str(SEARCH_SCRIPT);
    out.push_str(chrome::MENU_SCRIPT);
    out.push_str("</body>\n</html>\n");
    out
}

const SEARCH_SCRIPT: &str = r"  <script>
    const searchBox = document.getElementById('searchBox');
    const noResults = document.getElementById('noResults');
    const cards = Array.from(document.querySelectorAll('.ingredient-card'));
    let currentCategory = 'all';

    function filterIngredients() {
      const term = searchBox.value.toLowerCase();
      let visible = 0;
      cards.forEach(function(card) {
        const name = card.querySelector('h2').textContent.toLowerCase();
        const description = card.querySelector('.ingredient-description').textContent.toLowerCase();
        const category = card.getAttribute('data-category');
        const matchesSearch = term === '' || name.includes(term) || description.includes(term);
        const matchesCategory = currentCategory === 'all' || category === currentCategory;
        card.classList.toggle('hidden', !(matchesSearch && matchesCategory));
        if (matchesSearch && matchesCategory) visible++;
      });
      noResults.classList.toggle('hidden', visible !== 0);
    }

    searchBox.addEventListener('input', filterIngredients);
    document.querySelectorAll('.filter-tab').forEach(function(tab) {
      tab.addEventListener('click', function() {
        document.querySelectorAll('.filter-tab').forEach(function(t) { t.classList.remove('active'); });
        tab.classList.add('active');
        currentCategory = tab.getAttribute('data-category');
        filterIngredients();
      });
    });
  </script>
";
