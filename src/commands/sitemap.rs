use anyhow::{Context, Result, bail};
use larder::config::Site;
use larder::date::Date;
use larder::db::Database;
use larder::log;
use larder::sitemap::{self, Entry, LASTMOD_TIME, Sitemap};

use super::rule;

pub struct AddOptions<'a> {
    pub lastmod: Option<&'a str>,
    pub changefreq: Option<&'a str>,
    pub priority: Option<&'a str>,
}

fn open(site: &Site) -> Result<Sitemap> {
    let path = site.sitemap();
    if !path.exists() {
        bail!("no sitemap at {}", path.display());
    }
    Sitemap::read(&path)
}

pub fn list(site: &Site) -> Result<()> {
    let map = open(site)?;
    for loc in map.locs() {
        println!("{loc}");
    }
    println!("{}", rule(60));
    println!("{} URL(s)", map.url_count());
    Ok(())
}

pub fn add(site: &Site, urls: &[String], opts: &AddOptions<'_>) -> Result<()> {
    let path = site.sitemap();
    let mut map = if path.exists() { Sitemap::read(&path)? } else { Sitemap::default() };

    let lastmod = match opts.lastmod {
        Some(date) => {
            let date = Date::parse(date).with_context(|| format!("invalid date `{date}`"))?;
            format!("{}{LASTMOD_TIME}", date.to_iso())
        }
        None => format!("{}{LASTMOD_TIME}", Date::today().to_iso()),
    };

    let mut added = 0usize;
    for url in urls {
        let mut entry = Entry::new(url.as_str()).lastmod(lastmod.as_str());
        if let Some(freq) = opts.changefreq {
            entry = entry.changefreq(freq);
        }
        if let Some(priority) = opts.priority {
            entry = entry.priority(priority);
        }
        if map.add(&entry) {
            log!("sitemap"; "added {url}");
            added += 1;
        } else {
            log!("sitemap"; "{url} already listed");
        }
    }

    if added > 0 {
        map.write(&path)?;
    }
    log!("done"; "{added} added, {} URL(s) total", map.url_count());
    Ok(())
}

/// Each target is a full URL or an ingredient slug.
pub fn remove(site: &Site, targets: &[String]) -> Result<()> {
    let path = site.sitemap();
    let mut map = open(site)?;
    let mut removed = 0usize;

    for target in targets {
        let loc = if target.contains("://") {
            target.clone()
        } else {
            sitemap::ingredient_loc(&site.config.site.base_url, target)
        };
        match map.remove_loc(&loc) {
            0 => log!("sitemap"; "{loc} not listed"),
            n => {
                log!("sitemap"; "removed {loc}");
                removed += n;
            }
        }
    }

    if removed > 0 {
        map.write(&path)?;
    }
    log!("done"; "{removed} removed, {} URL(s) left", map.url_count());
    Ok(())
}

/// Print the analyzer, directory and ingredient entries; with `write`,
/// splice the missing ones into the sitemap.
pub fn entries(site: &Site, date: Option<&str>, write: bool) -> Result<()> {
    let date = match date {
        Some(d) => Date::parse(d).with_context(|| format!("invalid date `{d}`"))?,
        None => Date::today(),
    };
    let db = Database::open(&site.database())?;
    let slugs: Vec<String> = db.ingredients.iter().map(|i| i.slug()).collect();
    let entries = sitemap::entries_for(&site.config.site.base_url, &slugs, date);

    if !write {
        for entry in &entries {
            print!("{}", entry.to_xml());
        }
        return Ok(());
    }

    let path = site.sitemap();
    let mut map = if path.exists() { Sitemap::read(&path)? } else { Sitemap::default() };
    let added = entries.iter().filter(|e| map.add(e)).count();
    if added > 0 {
        map.write(&path)?;
    }
    log!("done"; "{added} of {} entries added to {}", entries.len(), path.display());
    Ok(())
}
