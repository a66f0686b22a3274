use std::path::Path;

use anyhow::Result;
use larder::config;
use larder::templates;

use super::write_if_missing;

pub fn run(root: &Path) -> Result<()> {
    let config_path = root.join(config::FILE_NAME);
    write_if_missing(&config_path, templates::LARDER_TOML)?;
    write_if_missing(&root.join("patches/site-chrome.toml"), templates::PATCH_EXAMPLE)?;
    write_if_missing(&root.join("patches/aliases.example.json"), templates::ALIASES_EXAMPLE)?;

    println!();
    println!("Next steps:");
    println!("  larder validate");
    println!("  larder patch patches/site-chrome.toml --dry-run");

    Ok(())
}
