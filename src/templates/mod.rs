pub const LARDER_TOML: &str = r#"# larder configuration. Every key is optional; relative paths resolve
# against --root.

[site]
base_url = "https://wattspet.com"
host = "wattspet.com"
brand = "Watts"
default_date = "2026-01-25"
reports_dir = "."

[paths]
database = "data/ingredients.json"
ingredients_dir = "ingredient-analyzer/ingredients"
slug_map = "ingredient-analyzer/ingredient-slugs.json"
sitemap = "sitemap.xml"
blog_dir = "blog"
directory_page = "ingredient-analyzer/ingredients/index.html"

[indexnow]
endpoint = "https://api.indexnow.org/indexnow"
# key_file = "0123456789abcdef.txt"

[dates]
cutoff = "2025-12"
schedule = [
    "2025-12-15T09:00:00-05:00",
    "2026-01-05T09:00:00-05:00",
    "2026-01-25T10:00:00-05:00",
    "2026-02-09T10:00:00-05:00",
]
"#;

pub const PATCH_EXAMPLE: &str = r#"# Run with `larder patch patches/site-chrome.toml --dry-run` first.
roots = ["blog", "ingredient-analyzer"]

[[rules]]
name = "nav label"
find = '<li><a href="/ingredient-analyzer/">Ingredients</a></li>'
replace = '<li><a href="/ingredient-analyzer/">Ingredient Analyzer</a></li>'

[[rules]]
name = "active nav label"
find = '<li><a href="/ingredient-analyzer/" class="active">Ingredients</a></li>'
replace = '<li><a href="/ingredient-analyzer/" class="active">Ingredient Analyzer</a></li>'

[[rules]]
name = "logo link"
regex = '(<div class="logo-container">)\s*(<img src="/watts-logo-white\.svg" alt="Watts" class="logo">)\s*(</div>)'
replace = '''${1}
          <a href="/" aria-label="Watts home">
            ${2}
          </a>
        ${3}'''

[[rules]]
name = "callout css"
find = "</style>"
replace = """
    .callout { background: var(--cream); border-left: 4px solid var(--brand-orange); border-radius: 8px; padding: 20px 24px; margin: 32px 0; }
    .callout p:last-child { margin-bottom: 0; }
  </style>"""
marker = ".callout { background: var(--cream);"
once = true

[[rules]]
name = "barley h1"
files = ["ingredient-analyzer/ingredients/barley/index.html"]
find = "<h1>Barley</h1>"
replace = "<h1>Barley in Dog Food: Is It Safe?</h1>"
"#;

/// Skeleton for `larder aliases apply`.
pub const ALIASES_EXAMPLE: &str = r#"{
  "add": {
    "Melatonin": ["melatonin supplement"]
  },
  "remove": {}
}
"#;
