//! Read, rewrite, write back only on change.
//!
//! Patch rules are plain data loaded from TOML:
//!
//! ```toml
//! roots = ["blog"]
//!
//! [[rules]]
//! name = "callout css"
//! find = "</style>"
//! replace = ".callout { border-left: 4px solid var(--brand-orange); }\n</style>"
//! marker = ".callout {"
//! once = true
//! ```

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Deserialize;

use crate::{debug, log, walk};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
    Missing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    pub changed: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub failed: usize,
    pub changed_files: Vec<PathBuf>,
}

impl Batch {
    pub fn record(&mut self, path: &Path, outcome: Outcome) {
        match outcome {
            Outcome::Changed => {
                self.changed += 1;
                self.changed_files.push(path.to_path_buf());
            }
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::Missing => self.missing += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.changed + self.unchanged + self.missing + self.failed
    }

    pub fn print_summary(&self, module: &str) {
        log!(module; "{} changed, {} unchanged, {} missing, {} failed",
            self.changed, self.unchanged, self.missing, self.failed);
    }
}

/// Rewrite `path` through `f`. The file is written only when the result
/// differs; a missing file is logged and skipped.
pub fn apply(path: &Path, f: impl FnOnce(&str) -> String) -> Result<Outcome> {
    edit(path, true, |text| Ok(f(text)))
}

fn edit(path: &Path, write: bool, f: impl FnOnce(&str) -> Result<String>) -> Result<Outcome> {
    if !path.is_file() {
        log!("warn"; "{} not found, skipping", path.display());
        return Ok(Outcome::Missing);
    }

    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let updated = f(&text)?;
    if updated == text {
        debug!("transform"; "{}: no change needed", path.display());
        return Ok(Outcome::Unchanged);
    }

    if write {
        fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(Outcome::Changed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied<'a> {
    Patched(Cow<'a, str>),
    /// The marker is already in the text.
    Marked,
    NoMatch,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatchRule {
    pub name: String,
    /// Literal text to replace.
    pub find: Option<String>,
    /// Pattern to replace; `$1` style references work in `replace`.
    pub regex: Option<String>,
    pub replace: String,
    /// When present in a file, the rule has already run there.
    pub marker: Option<String>,
    /// Restrict the rule to paths ending with one of these.
    pub files: Vec<String>,
    /// Replace the first match only.
    pub once: bool,
}

impl PatchRule {
    pub fn validate(&self) -> Result<()> {
        match (&self.find, &self.regex) {
            (Some(_), Some(_)) => bail!("rule `{}` sets both `find` and `regex`", self.name),
            (None, None) => bail!("rule `{}` needs `find` or `regex`", self.name),
            (None, Some(pattern)) => {
                Regex::new(pattern)
                    .with_context(|| format!("rule `{}` has an invalid regex", self.name))?;
                Ok(())
            }
            (Some(find), None) if find.is_empty() => {
                bail!("rule `{}` has an empty `find`", self.name)
            }
            (Some(_), None) => Ok(()),
        }
    }

    pub fn targets(&self, path: &Path) -> bool {
        if self.files.is_empty() {
            return true;
        }
        let path = path.to_string_lossy().replace('\\', "/");
        self.files.iter().any(|f| path.ends_with(f.as_str()))
    }

    pub fn apply<'a>(&self, text: &'a str) -> Result<Applied<'a>> {
        if let Some(marker) = &self.marker
            && text.contains(marker.as_str())
        {
            return Ok(Applied::Marked);
        }

        let patched: Cow<'a, str> = match (&self.find, &self.regex) {
            (Some(find), _) if !find.is_empty() => {
                if !text.contains(find.as_str()) {
                    return Ok(Applied::NoMatch);
                }
                let limit = if self.once { 1 } else { usize::MAX };
                Cow::Owned(text.replacen(find.as_str(), &self.replace, limit))
            }
            (_, Some(pattern)) => {
                let re = Regex::new(pattern)
                    .with_context(|| format!("rule `{}` has an invalid regex", self.name))?;
                let replaced = if self.once {
                    re.replace(text, self.replace.as_str())
                } else {
                    re.replace_all(text, self.replace.as_str())
                };
                if matches!(replaced, Cow::Borrowed(_)) {
                    return Ok(Applied::NoMatch);
                }
                replaced
            }
            _ => bail!("rule `{}` needs `find` or `regex`", self.name),
        };

        if patched == text { Ok(Applied::NoMatch) } else { Ok(Applied::Patched(patched)) }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PatchSet {
    /// Directories whose `.html` files are patched, recursively.
    pub roots: Vec<String>,
    /// Individual files, any type.
    pub files: Vec<String>,
    pub rules: Vec<PatchRule>,
}

impl PatchSet {
    pub fn from_str(content: &str) -> Result<Self> {
        let set: Self = toml::from_str(content).context("malformed patch rules")?;
        if set.rules.is_empty() {
            bail!("patch file defines no [[rules]]");
        }
        for rule in &set.rules {
            rule.validate()?;
        }
        Ok(set)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Every file the set covers under `root`, in walk order, without
    /// repeats.
    pub fn targets(&self, root: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for dir in &self.roots {
            for entry in walk::html_files(&root.join(dir)) {
                paths.push(entry.into_path());
            }
        }
        paths.extend(self.files.iter().map(|f| root.join(f)));

        let mut seen = std::collections::HashSet::new();
        paths.retain(|p| seen.insert(p.clone()));
        paths
    }

    /// All rules in order over `text`. Returns the names of rules that
    /// changed it.
    pub fn patch(&self, path: &Path, text: &str) -> Result<(String, Vec<String>)> {
        let mut current = text.to_string();
        let mut fired = Vec::new();
        for rule in self.rules.iter().filter(|r| r.targets(path)) {
            match rule.apply(&current)? {
                Applied::Patched(next) => {
                    let next = next.into_owned();
                    current = next;
                    fired.push(rule.name.clone());
                }
                Applied::Marked => {
                    debug!("patch"; "{}: `{}` already applied", path.display(), rule.name);
                }
                Applied::NoMatch => debug!("patch"; "{}: `{}` no match", path.display(), rule.name),
            }
        }
        Ok((current, fired))
    }

    /// With `dry_run`, files are read and counted but never written.
    pub fn run(&self, root: &Path, dry_run: bool) -> Batch {
        let mut batch = Batch::default();

        for path in self.targets(root) {
            let mut fired = Vec::new();
            let result = edit(&path, !dry_run, |text| {
                let (patched, names) = self.patch(&path, text)?;
                fired = names;
                Ok(patched)
            });
            match result {
                Ok(outcome) => {
                    if outcome == Outcome::Changed {
                        log!("patch"; "{} ({})", path.display(), fired.join(", "));
                    }
                    batch.record(&path, outcome);
                }
                Err(e) => {
                    log!("error"; "{}: {e:#}", path.display());
                    batch.failed += 1;
                }
            }
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(find: &str, replace: &str) -> PatchRule {
        PatchRule {
            name: "test".to_string(),
            find: Some(find.to_string()),
            replace: replace.to_string(),
            ..PatchRule::default()
        }
    }

    #[test]
    fn test_marker_blocks_second_application() {
        let mut r = rule("</style>", ".x{}</style>");
        r.marker = Some(".x{}".to_string());
        let Applied::Patched(once) = r.apply("<style></style>").unwrap() else {
            panic!("expected a patch");
        };
        assert_eq!(r.apply(&once).unwrap(), Applied::Marked);
    }

    #[test]
    fn test_regex_without_match() {
        let r = PatchRule {
            name: "re".to_string(),
            regex: Some(r"<h1>(\w+)</h1>".to_string()),
            replace: "<h1 class=\"t\">$1</h1>".to_string(),
            ..PatchRule::default()
        };
        assert_eq!(r.apply("<p>none</p>").unwrap(), Applied::NoMatch);
        assert!(matches!(r.apply("<h1>Title</h1>").unwrap(), Applied::Patched(_)));
    }

    #[test]
    fn test_rule_with_both_patterns_is_rejected() {
        let mut r = rule("a", "b");
        r.regex = Some("a".to_string());
        assert!(r.validate().is_err());
    }
}
