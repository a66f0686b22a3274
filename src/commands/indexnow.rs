use anyhow::{Context, Result, bail};
use larder::config::Site;
use larder::indexnow::{self, Submission};
use larder::sitemap::Sitemap;
use larder::{debug, log};

pub fn run(site: &Site, all: bool, urls: &[String]) -> Result<()> {
    let key_file = match &site.config.indexnow.key_file {
        Some(path) => site.resolve(path),
        None => indexnow::find_key_file(&site.root).with_context(|| {
            format!(
                "no IndexNow key file in {}; set indexnow.key_file or LARDER_INDEXNOW_KEY_FILE",
                site.root.display()
            )
        })?,
    };
    let key = indexnow::read_key(&key_file)?;
    debug!("indexnow"; "key from {}", key_file.display());

    let mut list = urls.to_vec();
    if all {
        list.extend(Sitemap::read(&site.sitemap())?.locs());
    }
    if list.is_empty() {
        bail!("no URLs given; pass URLs or --all");
    }

    let cfg = &site.config;
    let submission = Submission::for_site(&cfg.site.base_url, &cfg.site.host, &key, &list);
    log!("indexnow"; "submitting {} URL(s) to {}", submission.url_list.len(), cfg.indexnow.endpoint);
    for url in &submission.url_list {
        debug!("indexnow"; "{url}");
    }

    let status = indexnow::submit(&cfg.indexnow.endpoint, &submission)?;
    log!("done"; "IndexNow accepted the submission (HTTP {status})");
    Ok(())
}
