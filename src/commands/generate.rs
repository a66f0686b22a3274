use anyhow::Result;
use larder::config::Site;
use larder::db::Database;
use larder::{log, render};

pub fn run(site: &Site, slug: Option<&str>) -> Result<()> {
    let db = Database::open(&site.database())?;
    let generated = render::generate_pages(&db, site, slug)?;

    if let Some(path) = &generated.slug_map {
        log!("generate"; "slug map written to {}", path.display());
    }
    log!("done"; "generated {} page(s) in {}", generated.pages.len(), site.ingredients_dir().display());
    Ok(())
}
