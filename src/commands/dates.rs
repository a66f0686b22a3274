use anyhow::{Context, Result};
use larder::config::Site;
use larder::date::Date;
use larder::dates::{self, Schedule};
use larder::transform::{self, Batch};
use larder::{debug, log, walk};

/// Give every post dated before `cutoff` the next scheduled date.
pub fn run(site: &Site, cutoff: Option<&str>) -> Result<()> {
    let cutoff = cutoff.unwrap_or(&site.config.dates.cutoff);
    let cutoff = Date::parse_month(cutoff)
        .with_context(|| format!("cutoff `{cutoff}` is not a YYYY-MM month"))?;
    let mut schedule = Schedule::new(&site.config.dates.schedule)?;
    let mut batch = Batch::default();

    for path in walk::blog_posts(&site.blog_dir()) {
        let mut assigned = None;
        let outcome = transform::apply(&path, |html| {
            match dates::update(html, cutoff, &mut schedule) {
                Some((updated, timestamp)) => {
                    assigned = Some(timestamp);
                    updated
                }
                None => html.to_string(),
            }
        })?;

        match &assigned {
            Some(ts) => log!("dates"; "{} -> {}", walk::file_name(&path), ts),
            None => debug!("dates"; "{}: nothing to refresh", walk::file_name(&path)),
        }
        batch.record(&path, outcome);
    }

    batch.print_summary("done");
    Ok(())
}
