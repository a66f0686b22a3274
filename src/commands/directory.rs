use anyhow::Result;
use larder::config::Site;
use larder::db::Database;
use larder::{log, render};

pub fn run(site: &Site) -> Result<()> {
    let db = Database::open(&site.database())?;
    let path = render::generate_directory(&db, site)?;
    log!("done"; "directory with {} ingredients written to {}", db.ingredients.len(), path.display());
    Ok(())
}
