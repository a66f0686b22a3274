pub mod logger;

pub mod audit;
pub mod config;
pub mod date;
pub mod dates;
pub mod db;
pub mod faqs;
pub mod html;
pub mod indexnow;
pub mod linker;
pub mod render;
pub mod retire;
pub mod sitemap;
pub mod slug;
pub mod templates;
pub mod transform;
pub mod walk;
