use std::path::Path;

use anyhow::{Result, bail};
use larder::config::Site;
use larder::log;
use larder::transform::PatchSet;

use super::relative;

pub fn run(site: &Site, rules: &Path, dry_run: bool) -> Result<()> {
    let set = PatchSet::load(&site.resolve(rules))?;
    log!("patch"; "{} rule(s) over {} file(s){}",
        set.rules.len(),
        set.targets(&site.root).len(),
        if dry_run { " (dry run)" } else { "" });

    let batch = set.run(&site.root, dry_run);
    if dry_run {
        for path in &batch.changed_files {
            println!("would change {}", relative(&site.root, path));
        }
    }
    batch.print_summary("done");

    if batch.failed > 0 {
        bail!("{} file(s) failed to patch", batch.failed);
    }
    Ok(())
}
