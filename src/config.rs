//! Site configuration from `larder.toml`.
//!
//! | Section      | Purpose                                         |
//! |--------------|-------------------------------------------------|
//! | `[site]`     | Public URL, host, brand, fallback page date     |
//! | `[paths]`    | Database, generated pages, sitemap, blog        |
//! | `[indexnow]` | Endpoint and key file                           |
//! | `[dates]`    | Blog refresh schedule and cutoff month          |
//!
//! Every section defaults, so a missing file behaves like an empty one.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const FILE_NAME: &str = "larder.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub paths: PathsConfig,
    pub indexnow: IndexNowConfig,
    pub dates: DatesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Scheme and host, no trailing slash.
    pub base_url: String,
    pub host: String,
    pub brand: String,
    /// Stamp used when a record carries no `lastUpdated`.
    pub default_date: String,
    pub reports_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wattspet.com".to_string(),
            host: "wattspet.com".to_string(),
            brand: "Watts".to_string(),
            default_date: "2026-01-25".to_string(),
            reports_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub database: PathBuf,
    pub ingredients_dir: PathBuf,
    pub slug_map: PathBuf,
    pub sitemap: PathBuf,
    pub blog_dir: PathBuf,
    pub directory_page: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("data/ingredients.json"),
            ingredients_dir: PathBuf::from("ingredient-analyzer/ingredients"),
            slug_map: PathBuf::from("ingredient-analyzer/ingredient-slugs.json"),
            sitemap: PathBuf::from("sitemap.xml"),
            blog_dir: PathBuf::from("blog"),
            directory_page: PathBuf::from("ingredient-analyzer/ingredients/index.html"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexNowConfig {
    pub endpoint: String,
    /// Looked up in the site root when unset.
    pub key_file: Option<PathBuf>,
}

impl Default for IndexNowConfig {
    fn default() -> Self {
        Self { endpoint: "https://api.indexnow.org/indexnow".to_string(), key_file: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatesConfig {
    /// RFC 3339 timestamps handed out in order, wrapping around.
    pub schedule: Vec<String>,
    /// Posts with any date before this `YYYY-MM` get refreshed.
    pub cutoff: String,
}

impl Default for DatesConfig {
    fn default() -> Self {
        let schedule = [
            "2025-12-15T09:00:00-05:00",
            "2025-12-18T09:00:00-05:00",
            "2025-12-22T10:00:00-05:00",
            "2026-01-05T09:00:00-05:00",
            "2026-01-08T10:00:00-05:00",
            "2026-01-12T09:00:00-05:00",
            "2026-01-15T09:00:00-05:00",
            "2026-01-18T10:00:00-05:00",
            "2026-01-22T09:00:00-05:00",
            "2026-01-25T10:00:00-05:00",
            "2026-01-28T09:00:00-05:00",
            "2026-02-01T09:00:00-05:00",
            "2026-02-04T10:00:00-05:00",
            "2026-02-07T09:00:00-05:00",
            "2026-02-09T10:00:00-05:00",
        ];
        Self { schedule: schedule.map(String::from).to_vec(), cutoff: "2025-12".to_string() }
    }
}

impl Config {
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Read `path` if it exists, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Self::from_str(&content).with_context(|| format!("invalid config {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = env::var("LARDER_BASE_URL") {
            self.site.base_url = url;
        }
        if let Ok(file) = env::var("LARDER_INDEXNOW_KEY_FILE") {
            self.indexnow.key_file = Some(PathBuf::from(file));
        }
        self.site.base_url = self.site.base_url.trim_end_matches('/').to_string();
    }
}

/// A site root plus the config that describes it. Every configured path is
/// resolved against `root`.
#[derive(Debug, Clone)]
pub struct Site {
    pub root: PathBuf,
    pub config: Config,
}

impl Site {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self { root: root.into(), config }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }

    pub fn database(&self) -> PathBuf {
        self.resolve(&self.config.paths.database)
    }

    pub fn ingredients_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.ingredients_dir)
    }

    pub fn slug_map(&self) -> PathBuf {
        self.resolve(&self.config.paths.slug_map)
    }

    pub fn sitemap(&self) -> PathBuf {
        self.resolve(&self.config.paths.sitemap)
    }

    pub fn blog_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.blog_dir)
    }

    pub fn directory_page(&self) -> PathBuf {
        self.resolve(&self.config.paths.directory_page)
    }

    pub fn report(&self, name: &str) -> PathBuf {
        self.resolve(&self.config.site.reports_dir).join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.paths.database, PathBuf::from("data/ingredients.json"));
        assert_eq!(config.dates.schedule.len(), 15);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_str("[site]\nbrand = \"Acme\"\n").unwrap();
        assert_eq!(config.site.brand, "Acme");
        assert_eq!(config.site.host, "wattspet.com");
    }

    #[test]
    fn test_unknown_toml_is_error() {
        assert!(Config::from_str("[site\nbrand = 1").is_err());
    }
}
