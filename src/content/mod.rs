//! Content store: markdown files in, typed posts out.
//!
//! The store owns the content directory and is the only producer of
//! [`Post`] / [`PostSummary`] values. It keeps no cache: every call
//! re-reads the directory, so edits to content files are visible on the
//! next request without any invalidation machinery. Content sets are
//! small enough that the repeated I/O is not a concern.

mod front_matter;
mod markdown;
mod types;

pub use front_matter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use types::{Post, PostSummary};

use crate::log;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File extension recognized as content.
const CONTENT_EXT: &str = "md";

/// Read-only store over a directory of markdown files.
pub struct ContentStore {
    dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentStore {
    /// Create a store over `dir`. The directory may not exist yet; a
    /// missing directory behaves as an empty store, not an error.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// List all posts, sorted by date descending.
    ///
    /// Ties keep discovery order (filename order, which is stable across
    /// calls). Files that cannot be read are logged and skipped rather
    /// than failing the whole listing.
    pub fn list_summaries(&self) -> Result<Vec<PostSummary>> {
        let mut summaries: Vec<PostSummary> = Vec::new();

        for path in self.content_files()? {
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(err) => {
                    log!("content"; "skipping {}: {err}", path.display());
                    continue;
                }
            };
            let (matter, _) = front_matter::extract(&source);
            summaries.push(PostSummary {
                slug: effective_slug(&matter, &path),
                title: matter.title.unwrap_or_else(|| "Untitled".to_string()),
                date: matter.date.unwrap_or_default(),
                excerpt: matter.excerpt.unwrap_or_default(),
                tags: matter.tags.unwrap_or_default(),
            });
        }

        // ISO dates compare lexicographically; stable sort keeps
        // discovery order for equal dates
        summaries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(summaries)
    }

    /// Find a post by its effective slug.
    ///
    /// Scans all content files, computing each file's effective slug with
    /// the same fallback rule as [`Self::list_summaries`]; the first match
    /// wins. Returns `Ok(None)` when nothing matches, which is the normal
    /// not-found result, never an error.
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Post>> {
        for path in self.content_files()? {
            let source = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let (matter, body) = front_matter::extract(&source);

            if effective_slug(&matter, &path) != slug {
                continue;
            }

            return Ok(Some(Post {
                slug: slug.to_string(),
                title: matter.title.unwrap_or_else(|| "Untitled".to_string()),
                date: matter.date.unwrap_or_default(),
                excerpt: matter.excerpt.unwrap_or_default(),
                tags: matter.tags.unwrap_or_default(),
                content: self.renderer.render(body),
            }));
        }

        Ok(None)
    }

    /// Collect content file paths in deterministic (filename) order.
    ///
    /// A missing directory yields an empty list.
    fn content_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read {}", self.dir.display()))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(CONTENT_EXT)
            })
            .collect();

        files.sort();
        Ok(files)
    }
}

/// Effective slug: front-matter `slug` when present, else the file stem.
fn effective_slug(matter: &FrontMatter, path: &Path) -> String {
    matter.slug.clone().unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}
