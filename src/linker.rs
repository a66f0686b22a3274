//! Contextual link insertion.
//!
//! Keywords are matched case-insensitively on word boundaries, only in
//! character data outside existing anchors, and the matched text itself
//! becomes the anchor text. Output never contains an anchor inside an
//! anchor.

use std::fs;
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::html::{element, escape, section, text_spans};

pub const DEFAULT_MAX_LINKS: usize = 3;

/// Elements whose text is never linked in blog posts.
const BLOG_SKIP: [&str; 13] = [
    "a", "h1", "h2", "h3", "h4", "h5", "h6", "nav", "head", "script", "style", "title", "button",
];
const BLOG_WITHIN: [&str; 3] = ["p", "li", "td"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRule {
    pub keywords: Vec<String>,
    /// `<h2>` ids or heading texts to search. Empty means anywhere.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,
    pub link: String,
    /// Phrases that veto a match when they start at or overlap it, e.g.
    /// `whitefish meal` for a `whitefish` rule.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl LinkRule {
    pub fn new(keywords: &[&str], sections: &[&str], link: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            sections: sections.iter().map(|s| (*s).to_string()).collect(),
            link: link.to_string(),
            exclude: Vec::new(),
        }
    }

    pub fn excluding(mut self, phrases: &[&str]) -> Self {
        self.exclude = phrases.iter().map(|p| (*p).to_string()).collect();
        self
    }

    /// One alternation over every keyword, longest first so `fish oil`
    /// wins over `fish`.
    fn matcher(&self) -> Option<Regex> {
        let mut keywords: Vec<&str> =
            self.keywords.iter().map(String::as_str).filter(|k| !k.is_empty()).collect();
        if keywords.is_empty() {
            return None;
        }
        keywords.sort_by_key(|k| std::cmp::Reverse(k.len()));
        let alternation = keywords.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
        Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).ok()
    }

    fn already_linked(&self, html: &str) -> bool {
        html.contains(&format!("href=\"{}\"", self.link))
    }

    fn excluded(&self, text: &str, hit: &Range<usize>) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let longest = self.exclude.iter().map(String::len).max().unwrap_or(0);
        let mut end = (hit.end + longest).min(text.len());
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let window = text[hit.start..end].to_lowercase();
        self.exclude.iter().any(|ex| window.contains(&ex.to_lowercase()))
    }

    /// First acceptable keyword hit inside any of `spans`, as an absolute
    /// byte range into `html`.
    fn first_hit(&self, re: &Regex, html: &str, spans: &[Range<usize>]) -> Option<Range<usize>> {
        spans.iter().find_map(|span| {
            let text = &html[span.clone()];
            re.find_iter(text)
                .map(|m| m.range())
                .find(|hit| !self.excluded(text, hit))
                .map(|hit| span.start + hit.start..span.start + hit.end)
        })
    }
}

pub fn load_rules(path: &Path) -> Result<Vec<LinkRule>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid link rules {}", path.display()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Linked {
    pub html: String,
    /// Targets linked, in insertion order.
    pub added: Vec<String>,
}

impl Linked {
    fn unchanged(html: &str) -> Self {
        Self { html: html.to_string(), added: Vec::new() }
    }
}

fn wrap(html: &mut String, hit: Range<usize>, link: &str) {
    let anchor = format!("<a href=\"{}\">{}</a>", escape(link), &html[hit.clone()]);
    html.replace_range(hit, &anchor);
}

/// Paragraphs (`<p>` ranges) inside `within` that hold no anchor yet.
fn bare_paragraphs(html: &str, within: Range<usize>) -> Vec<Range<usize>> {
    let re = Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").expect("static pattern");
    re.captures_iter(&html[within.clone()])
        .filter_map(|c| c.get(1))
        .filter(|m| !m.as_str().contains("<a "))
        .map(|m| within.start + m.start()..within.start + m.end())
        .collect()
}

/// Ingredient pages: at most one link per rule, at most `max_links` per
/// page, only in bare paragraphs of the rule's sections inside `<main>`.
pub fn link_page(page: &str, rules: &[LinkRule], max_links: usize) -> Linked {
    let Some(main) = element(page, "main") else {
        return Linked::unchanged(page);
    };
    let mut body = page[main.inner.clone()].to_string();
    let mut added = Vec::new();

    for rule in rules {
        if added.len() >= max_links {
            break;
        }
        if rule.already_linked(&body) {
            continue;
        }
        let Some(re) = rule.matcher() else {
            continue;
        };

        let regions: Vec<Range<usize>> = if rule.sections.is_empty() {
            vec![0..body.len()]
        } else {
            rule.sections.iter().filter_map(|key| section(&body, key)).collect()
        };

        let hit = regions.into_iter().find_map(|region| {
            bare_paragraphs(&body, region).into_iter().find_map(|para| {
                let spans: Vec<Range<usize>> = text_spans(&body[para.clone()], &[], &["a"])
                    .into_iter()
                    .map(|s| para.start + s.start..para.start + s.end)
                    .collect();
                rule.first_hit(&re, &body, &spans)
            })
        });

        if let Some(hit) = hit {
            wrap(&mut body, hit, &rule.link);
            added.push(rule.link.clone());
        }
    }

    if added.is_empty() {
        return Linked::unchanged(page);
    }
    let mut html = String::with_capacity(page.len() + body.len());
    html.push_str(&page[..main.inner.start]);
    html.push_str(&body);
    html.push_str(&page[main.inner.end..]);
    Linked { html, added }
}

/// Blog posts: the first whole-word occurrence per rule, inside `<p>`,
/// `<li>` or `<td>` of the article (or `<main>`), never in headings,
/// navigation or existing anchors.
pub fn link_blog(page: &str, rules: &[LinkRule]) -> Linked {
    let Some(container) = element(page, "article").or_else(|| element(page, "main")) else {
        return Linked::unchanged(page);
    };
    let mut body = page[container.inner.clone()].to_string();
    let mut added = Vec::new();

    for rule in rules {
        if rule.already_linked(page) || rule.already_linked(&body) {
            continue;
        }
        let Some(re) = rule.matcher() else {
            continue;
        };
        let spans = text_spans(&body, &BLOG_WITHIN, &BLOG_SKIP);
        if let Some(hit) = rule.first_hit(&re, &body, &spans) {
            wrap(&mut body, hit, &rule.link);
            added.push(rule.link.clone());
        }
    }

    if added.is_empty() {
        return Linked::unchanged(page);
    }
    let mut html = String::with_capacity(page.len() + body.len());
    html.push_str(&page[..container.inner.start]);
    html.push_str(&body);
    html.push_str(&page[container.inner.end..]);
    Linked { html, added }
}

/// True when an anchor opens before the previous one closed.
pub fn has_nested_anchor(page: &str) -> bool {
    let re = Regex::new(r"(?i)<a\s|</a>").expect("static pattern");
    let mut open = false;
    for m in re.find_iter(page) {
        if m.as_str().starts_with("</") {
            open = false;
        } else if open {
            return true;
        } else {
            open = true;
        }
    }
    false
}

const WHAT_WHY: [&str; 2] = ["what-it-is", "why-used"];
const WHAT_WHY_PROFILE: [&str; 3] = ["what-it-is", "why-used", "nutritional-profile"];

/// Blog topics for ingredient pages.
pub fn default_page_rules() -> Vec<LinkRule> {
    vec![
        LinkRule::new(
            &["vitamin a", "retinol", "beta-carotene", "beta carotene"],
            &WHAT_WHY_PROFILE,
            "/blog/beef-liver-for-dogs.html",
        ),
        LinkRule::new(
            &[
                "vitamin b", "b vitamin", "b-vitamin", "thiamine", "riboflavin", "niacin",
                "pantothenic", "pyridoxine", "biotin", "folate", "folic acid", "cobalamin", "b12",
                "b6", "b1", "b2", "b3", "b5", "b9",
            ],
            &WHAT_WHY_PROFILE,
            "/blog/b-vitamins-for-dogs.html",
        ),
        LinkRule::new(
            &["vitamin d", "cholecalciferol", "ergocalciferol"],
            &WHAT_WHY,
            "/blog/vitamin-d-for-dogs.html",
        ),
        LinkRule::new(
            &["choline", "phosphatidylcholine"],
            &WHAT_WHY_PROFILE,
            "/blog/choline-for-dogs.html",
        ),
        LinkRule::new(
            &["zinc", "zinc oxide", "zinc sulfate", "zinc proteinate"],
            &WHAT_WHY,
            "/blog/zinc-for-dogs.html",
        ),
        LinkRule::new(
            &["omega-3", "omega 3", "epa", "dha", "fish oil", "salmon oil", "krill oil"],
            &WHAT_WHY,
            "/blog/omega-3-fish-oil-for-dogs.html",
        ),
        LinkRule::new(
            &["protein", "amino acid", "essential amino"],
            &["what-it-is", "nutritional-profile"],
            "/blog/protein-for-dogs.html",
        ),
        LinkRule::new(
            &["organ meat", "liver", "kidney", "heart", "spleen", "organ"],
            &WHAT_WHY,
            "/blog/organ-based-nutrition-for-dogs.html",
        ),
        LinkRule::new(
            &["glucosamine", "chondroitin", "joint", "cartilage", "msm"],
            &WHAT_WHY,
            "/blog/joint-supplements-for-dogs.html",
        ),
        LinkRule::new(
            &["green-lipped mussel", "green lipped mussel", "perna"],
            &WHAT_WHY,
            "/blog/green-lipped-mussel-for-dogs.html",
        ),
        LinkRule::new(
            &["collagen", "gelatin", "bone broth"],
            &WHAT_WHY,
            "/blog/collagen-for-dogs-benefits.html",
        ),
        LinkRule::new(
            &[
                "probiotic", "lactobacillus", "bifidobacterium", "gut bacteria", "gut health",
                "digestive health",
            ],
            &WHAT_WHY,
            "/blog/probiotics-for-dogs.html",
        ),
        LinkRule::new(
            &["prebiotic", "fiber", "fructooligosaccharide", "inulin"],
            &WHAT_WHY,
            "/blog/gut-health-for-dogs.html",
        ),
        LinkRule::new(
            &["immune", "immunity", "antioxidant", "beta-glucan", "beta glucan"],
            &WHAT_WHY,
            "/blog/immune-support-for-dogs.html",
        ),
        LinkRule::new(
            &["yeast fermentate", "epicor"],
            &WHAT_WHY,
            "/blog/yeast-fermentate-for-dogs.html",
        ),
        LinkRule::new(
            &["vitamin e", "tocopherol", "antioxidant", "polyphenol"],
            &WHAT_WHY,
            "/blog/antioxidants-for-dogs.html",
        ),
        LinkRule::new(
            &["skin", "coat", "fur", "dermal"],
            &["why-used"],
            "/blog/dog-skin-coat-supplements.html",
        ),
        LinkRule::new(
            &["synthetic", "natural form", "bioavailability", "absorption"],
            &WHAT_WHY,
            "/blog/whole-food-vs-synthetic-nutrients.html",
        ),
        LinkRule::new(
            &["filler", "unnecessary", "bulk", "by-product"],
            &["what-it-is", "concerns"],
            "/blog/fillers-in-dog-supplements.html",
        ),
        LinkRule::new(
            &["senior", "aging", "older dog", "elderly"],
            &["why-used"],
            "/blog/senior-dog-formula-kibble.html",
        ),
        LinkRule::new(
            &["puppy", "growing", "growth", "development"],
            &["why-used"],
            "/blog/puppy-vitamins.html",
        ),
    ]
}

fn ingredient_rule(keywords: &[&str], slug: &str) -> LinkRule {
    LinkRule::new(keywords, &[], &format!("{}{slug}/", crate::render::INGREDIENTS_PATH))
}

/// Ingredient pages for blog posts.
pub fn default_blog_rules() -> Vec<LinkRule> {
    vec![
        ingredient_rule(&["anchovies", "anchovy"], "anchovies"),
        ingredient_rule(&["tuna"], "tuna"),
        ingredient_rule(&["whitefish", "white fish"], "whitefish")
            .excluding(&["whitefish meal", "white fish meal"]),
        ingredient_rule(&["menhaden oil"], "menhaden-oil"),
        ingredient_rule(&["menhaden"], "menhaden").excluding(&["menhaden oil"]),
        ingredient_rule(&["olive oil"], "olive-oil"),
        ingredient_rule(&["pectin"], "pectin"),
        ingredient_rule(
            &[
                "yeast beta-glucans",
                "yeast beta-glucan",
                "beta-glucans from yeast",
                "beta-glucan from yeast",
            ],
            "yeast-beta-glucans",
        ),
        ingredient_rule(&["ashwagandha", "withania somnifera"], "withania-somnifera"),
        ingredient_rule(&["ginger"], "ginger"),
        ingredient_rule(&["slippery elm bark", "slippery elm"], "slippery-elm-bark"),
        ingredient_rule(&["quercetin"], "quercetin"),
        ingredient_rule(&["sea buckthorn", "sea-buckthorn"], "sea-buckthorn"),
        ingredient_rule(&["navy beans", "navy bean"], "navy-beans"),
        ingredient_rule(&["yellow peas", "yellow pea"], "yellow-peas").excluding(&["pea protein"]),
        ingredient_rule(&["split peas", "split pea"], "split-peas"),
        ingredient_rule(&["pinto beans", "pinto bean"], "pinto-beans"),
        ingredient_rule(&["lamb fat"], "lamb-fat"),
        ingredient_rule(&["duck fat"], "duck-fat"),
        ingredient_rule(&["palm fruit oil"], "palm-fruit-oil"),
        ingredient_rule(&["duck liver"], "duck-liver"),
        ingredient_rule(&["hydrolyzed yeast"], "hydrolyzed-yeast"),
        ingredient_rule(&["yeast fermentate"], "yeast-fermentate")
            .excluding(&["yeast fermentate for dogs"]),
        ingredient_rule(&["sweet potato fiber"], "sweet-potato-fiber"),
        ingredient_rule(&["lignocellulose"], "lignocellulose"),
        ingredient_rule(&["paractin"], "paractin"),
    ]
}

