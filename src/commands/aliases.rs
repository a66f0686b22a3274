use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use larder::config::Site;
use larder::db::{Database, ValidationError};
use larder::log;
use serde::Deserialize;

/// `{"add": {name: [alias, ..]}, "remove": {..}}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AliasEdits {
    add: BTreeMap<String, Vec<String>>,
    remove: BTreeMap<String, Vec<String>>,
}

pub fn add(site: &Site, name: &str, aliases: &[String]) -> Result<()> {
    let path = site.database();
    let mut db = Database::open(&path)?;
    let added = db.add_aliases(name, aliases)?;
    report(name, "added", &added);
    if !added.is_empty() {
        db.save(&path)?;
    }
    Ok(())
}

pub fn remove(site: &Site, name: &str, aliases: &[String]) -> Result<()> {
    let path = site.database();
    let mut db = Database::open(&path)?;
    let removed = db.remove_aliases(name, aliases)?;
    report(name, "removed", &removed);
    if !removed.is_empty() {
        db.save(&path)?;
    }
    Ok(())
}

/// Unknown names are reported and skipped; the rest of the file still
/// applies.
pub fn apply(site: &Site, file: &Path) -> Result<()> {
    let content =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let edits: AliasEdits = serde_json::from_str(&content)
        .with_context(|| format!("malformed alias edits {}", file.display()))?;

    let path = site.database();
    let mut db = Database::open(&path)?;
    let mut changed = 0usize;
    let mut skipped = 0usize;

    let ops: [(&BTreeMap<String, Vec<String>>, &str); 2] =
        [(&edits.add, "added"), (&edits.remove, "removed")];
    for (table, verb) in ops {
        for (name, aliases) in table {
            let result = if verb == "added" {
                db.add_aliases(name, aliases)
            } else {
                db.remove_aliases(name, aliases)
            };
            match result {
                Ok(list) => {
                    report(name, verb, &list);
                    changed += list.len();
                }
                Err(ValidationError::UnknownName(name)) => {
                    log!("warn"; "`{name}` not found, skipping");
                    skipped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    if changed > 0 {
        db.save(&path)?;
    }
    log!("done"; "{changed} alias change(s), {skipped} unknown name(s)");
    Ok(())
}

fn report(name: &str, verb: &str, aliases: &[String]) {
    if aliases.is_empty() {
        log!("aliases"; "{name}: no change needed");
    } else {
        log!("aliases"; "{name}: {verb} {}", aliases.join(", "));
    }
}
