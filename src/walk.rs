use std::path::{Path, PathBuf};

use walkdir::WalkDir;

fn is_html(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "html")
}

/// Every `.html` under `dir`, skipping dependency and VCS folders.
pub fn html_files(dir: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| {
            !e.path()
                .components()
                .any(|c| c.as_os_str() == "node_modules" || c.as_os_str() == ".git")
        })
        .filter(|e| e.file_type().is_file() && is_html(e.path()))
}

/// Top-level posts in the blog directory, without the index and drafts.
pub fn blog_posts(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && is_html(e.path()))
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            name != "index.html" && !name.contains("REDESIGN")
        })
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Immediate subdirectories that hold an `index.html`, by name.
pub fn page_dirs(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir() && e.path().join("index.html").is_file())
        .map(walkdir::DirEntry::into_path)
        .collect()
}

/// Final path component as an owned string.
pub fn file_name(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}
