use anyhow::Result;
use larder::config::Site;
use larder::faqs;
use larder::transform::{self, Batch};
use larder::{debug, log, walk};

/// Split long FAQ answers in every blog post.
pub fn run(site: &Site) -> Result<()> {
    let mut batch = Batch::default();
    let mut answers = 0usize;

    for path in walk::blog_posts(&site.blog_dir()) {
        let mut split = 0;
        let outcome = transform::apply(&path, |html| {
            let (out, n) = faqs::optimize(html);
            split = n;
            out
        })?;
        if split > 0 {
            log!("faqs"; "{}: split {split} answer(s)", walk::file_name(&path));
        } else {
            debug!("faqs"; "{}: no long answers", walk::file_name(&path));
        }
        answers += split;
        batch.record(&path, outcome);
    }

    batch.print_summary("done");
    log!("done"; "{answers} FAQ answer(s) split");
    Ok(())
}
