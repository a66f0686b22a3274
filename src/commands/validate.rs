use anyhow::{Result, bail};
use larder::config::Site;
use larder::db::{Database, ValidationError};
use larder::log;

use super::rule;

pub fn run(site: &Site, fix: bool) -> Result<()> {
    let path = site.database();
    let mut db = Database::read(&path)?;
    let mut report = db.validate();

    if fix && report.errors.iter().any(|e| matches!(e, ValidationError::DuplicateAlias { .. })) {
        let dropped = db.dedupe_aliases();
        report = db.validate();
        if report.is_ok() {
            db.save(&path)?;
            log!("done"; "dropped {dropped} duplicate alias(es), saved {}", path.display());
        }
    }

    println!("{} ingredients in {}", db.ingredients.len(), path.display());
    println!("{}", rule(60));
    for err in &report.errors {
        println!("{:<8} {err}", "error");
    }
    for warning in &report.warnings {
        println!("{:<8} {warning}", "warning");
    }
    println!("{}", rule(60));
    println!("{} error(s), {} warning(s)", report.errors.len(), report.warnings.len());

    if !report.is_ok() {
        bail!("database has schema errors");
    }
    Ok(())
}
