//! Header, footer and menu script shared by generated pages.

use std::fmt::Write;

use crate::html::escape;

pub const STYLESHEET: &str = "/ingredient-analyzer/ingredient-page.css";

const NAV: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/about.html", "About"),
    ("/blog/", "Blog"),
    ("/ingredient-analyzer/", "Ingredients"),
];

pub struct Head<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub canonical: &'a str,
    pub og_title: Option<&'a str>,
    pub og_description: Option<&'a str>,
    pub json_ld: &'a [String],
}

impl Head<'_> {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("    <meta charset=\"UTF-8\">\n");
        out.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(out, "    <title>{}</title>", escape(self.title));
        let _ = writeln!(
            out,
            "    <meta name=\"description\" content=\"{}\">",
            escape(self.description)
        );
        let _ = writeln!(out, "    <link rel=\"canonical\" href=\"{}\">", escape(self.canonical));
        if let Some(og_title) = self.og_title {
            let _ =
                writeln!(out, "    <meta property=\"og:title\" content=\"{}\">", escape(og_title));
            if let Some(og_desc) = self.og_description {
                let _ = writeln!(
                    out,
                    "    <meta property=\"og:description\" content=\"{}\">",
                    escape(og_desc)
                );
            }
            let _ = writeln!(
                out,
                "    <meta property=\"og:url\" content=\"{}\">",
                escape(self.canonical)
            );
            out.push_str("    <meta property=\"og:type\" content=\"article\">\n");
        }
        let _ = writeln!(out, "    <link rel=\"stylesheet\" href=\"{STYLESHEET}\">");
        for block in self.json_ld {
            out.push_str(block);
            out.push('\n');
        }
        out.push_str("</head>\n");
        out
    }
}

pub fn header(brand: &str) -> String {
    let mut out = String::from(
        "  <div class=\"header-wrapper\">
    <header>
      <div class=\"header-container\">
        <button class=\"hamburger\" aria-label=\"Toggle menu\">
          <span></span>
          <span></span>
          <span></span>
        </button>
        <nav>
          <ul>
",
    );
    for (href, label) in NAV {
        let _ = writeln!(out, "            <li><a href=\"{href}\">{label}</a></li>");
    }
    let brand = escape(brand);
    let _ = write!(
        out,
        "          </ul>
        </nav>
        <div class=\"logo-container\">
          <a href=\"/\" aria-label=\"{brand} home\">
            <img src=\"/watts-logo-white.svg\" alt=\"{brand}\" class=\"logo\">
          </a>
        </div>
      </div>
    </header>
  </div>
"
    );
    out
}

pub fn footer(brand: &str, email: &str) -> String {
    let brand = escape(brand);
    let email = escape(email);
    format!(
        "  <div class=\"footer-wrapper\">
    <footer>
      <div class=\"footer-content\">
        <div class=\"footer-left\"></div>
        <div class=\"footer-right\">
          <div class=\"footer-right-text\">
            <p><a href=\"mailto:{email}\">{email}</a></p>
          </div>
          <img src=\"/watts-logo-white.svg\" alt=\"{brand}\" class=\"footer-logo\">
        </div>
      </div>
    </footer>
  </div>
"
    )
}

pub const MENU_SCRIPT: &str = r"  <script>
    document.addEventListener('DOMContentLoaded', function() {
      const hamburger = document.querySelector('.hamburger');
      const navMenu = document.querySelector('nav ul');
      if (!hamburger || !navMenu) return;

      const close = function() {
        navMenu.classList.remove('active');
        hamburger.classList.remove('active');
      };

      hamburger.addEventListener('click', function() {
        navMenu.classList.toggle('active');
        this.classList.toggle('active');
      });
      navMenu.querySelectorAll('a').forEach(function(link) {
        link.addEventListener('click', close);
      });
      document.addEventListener('click', function(event) {
        if (!navMenu.contains(event.target) && !hamburger.contains(event.target)) close();
      });
    });
  </script>
";
