//! Splitting long blog FAQ answers into short paragraphs.

use regex::{Captures, Regex};

use crate::html::strip_tags;

/// Answers with more plain-text characters than this are split.
pub const LONG_ANSWER: usize = 300;

/// A follow-up paragraph closes early once it passes this many characters.
const PARAGRAPH_CHARS: usize = 250;

const INDENT: &str = "\n        ";

/// Sentences end at `. ` unless a lowercase letter follows.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if c != '.' || i < start {
            continue;
        }
        let mut next = text[i + 1..].chars();
        if next.next() == Some(' ') && next.next().is_none_or(|n| !n.is_lowercase()) {
            let sentence = text[start..=i].trim();
            if !sentence.is_empty() {
                out.push(sentence);
            }
            start = i + 2;
        }
    }
    let tail = text.get(start..).unwrap_or_default().trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Two sentences lead, the rest go two to a paragraph. `None` when the
/// answer is short or has two sentences or fewer.
pub fn split_answer(content: &str) -> Option<String> {
    let content = content.trim();
    if strip_tags(content).chars().count() <= LONG_ANSWER {
        return None;
    }
    let sentences = sentences(content);
    if sentences.len() <= 2 {
        return None;
    }

    let mut out = format!("<p>{}</p>", sentences[..2].join(" "));
    let mut paragraph = String::new();
    let mut count = 0;
    for sentence in &sentences[2..] {
        if !paragraph.is_empty() {
            paragraph.push(' ');
        }
        paragraph.push_str(sentence);
        count += 1;
        if count >= 2 || paragraph.chars().count() > PARAGRAPH_CHARS {
            out.push_str(&format!("{INDENT}<p>{paragraph}</p>"));
            paragraph.clear();
            count = 0;
        }
    }
    if !paragraph.is_empty() {
        out.push_str(&format!("{INDENT}<p>{paragraph}</p>"));
    }
    Some(out)
}

/// Split every long single-paragraph answer inside a `faq-item`. Returns
/// the new text and how many answers were split. Answers already spread
/// over several paragraphs are left alone.
pub fn optimize(html: &str) -> (String, usize) {
    let item = Regex::new(
        r#"(?s)(<div class="faq-item">\s*<h3>[^<]+</h3>\s*)<p>(.*?)</p>(\s*</div>)"#,
    )
    .expect("static pattern");
    let mut split = 0;
    let out = item.replace_all(html, |c: &Captures| {
        let answer = &c[2];
        let paragraphs = if answer.contains("</p>") { None } else { split_answer(answer) };
        match paragraphs {
            Some(paragraphs) => {
                split += 1;
                format!("{}{paragraphs}{}", &c[1], &c[3])
            }
            None => c[0].to_string(),
        }
    });
    (out.into_owned(), split)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG: [&str; 5] = [
        "Kelp supplies iodine, which supports a healthy thyroid in most adult dogs.",
        "Too much iodine can upset the same gland, so the dose matters a great deal.",
        "Most complete diets already meet the iodine requirement without extra kelp.",
        "Check the guaranteed analysis before adding a supplement to the bowl at home.",
        "Ask your vet first.",
    ];

    fn faq_item(answer: &str) -> String {
        format!("<div class=\"faq-item\">\n  <h3>Is kelp safe?</h3>\n  <p>{answer}</p>\n</div>")
    }

    #[test]
    fn test_sentences_skip_lowercase_continuations() {
        assert_eq!(
            sentences("Kelp is safe. it has iodine. Most dogs like it."),
            ["Kelp is safe. it has iodine.", "Most dogs like it."]
        );
        assert_eq!(
            sentences("Yes. <strong>Iodine</strong> matters. 2 grams is plenty."),
            ["Yes.", "<strong>Iodine</strong> matters.", "2 grams is plenty."]
        );
    }

    #[test]
    fn test_long_answer_split_into_paragraphs() {
        let html = faq_item(&LONG.join(" "));
        let (out, split) = optimize(&html);
        assert_eq!(split, 1);
        assert_eq!(
            out,
            format!(
                "<div class=\"faq-item\">\n  <h3>Is kelp safe?</h3>\n  <p>{} {}</p>{INDENT}<p>{} {}</p>{INDENT}<p>{}</p>\n</div>",
                LONG[0], LONG[1], LONG[2], LONG[3], LONG[4]
            )
        );
        assert_eq!(optimize(&out).1, 0);
    }

    #[test]
    fn test_short_answer_untouched() {
        let html = faq_item("Yes. In small amounts. Ask your vet.");
        let (out, split) = optimize(&html);
        assert_eq!(split, 0);
        assert_eq!(out, html);
    }
}
