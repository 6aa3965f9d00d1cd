//! Content validation command.
//!
//! Walks the content directory the same way the server does and reports
//! posts that would fail to resolve at request time, so problems show
//! up in the terminal instead of in production responses.

use crate::{config::SiteConfig, content::ContentStore, log};
use anyhow::{Result, bail};
use std::collections::HashSet;

/// Validate every post in the content directory.
///
/// Lists all summaries, then resolves each one by slug through the full
/// markdown pipeline. Fails if any listed post cannot be resolved.
pub fn check_content(config: &SiteConfig) -> Result<()> {
    let store = ContentStore::new(config.content_dir());
    let posts = store.list_summaries()?;

    if posts.is_empty() {
        log!("check"; "no posts found in {}", config.content_dir().display());
        return Ok(());
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut failed = 0usize;

    for summary in &posts {
        if !seen.insert(&summary.slug) {
            failed += 1;
            log!("error"; "{}: duplicate slug, an earlier post shadows this one", summary.slug);
            continue;
        }

        match store.get_by_slug(&summary.slug) {
            Ok(Some(post)) => {
                log!("check"; "{} ({}, {} bytes of html)", post.slug, post.date, post.content.len());
            }
            Ok(None) => {
                failed += 1;
                log!("error"; "{}: listed but not resolvable by slug", summary.slug);
            }
            Err(err) => {
                failed += 1;
                log!("error"; "{}: {err:#}", summary.slug);
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} posts failed validation", posts.len());
    }

    log!("check"; "{} posts ok", posts.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_rooted_at(dir: &TempDir) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.content.dir = dir.path().to_path_buf();
        config
    }

    #[test]
    fn test_check_passes_with_valid_posts() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.md"),
            "---\ntitle: A\ndate: \"2024-01-01\"\n---\nbody",
        )
        .unwrap();
        fs::write(
            dir.path().join("b.md"),
            "---\ntitle: B\ndate: \"2024-02-01\"\n---\nbody",
        )
        .unwrap();

        assert!(check_content(&config_rooted_at(&dir)).is_ok());
    }

    #[test]
    fn test_check_passes_with_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(check_content(&config_rooted_at(&dir)).is_ok());
    }

    #[test]
    fn test_check_fails_on_duplicate_slugs() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("one.md"),
            "---\nslug: same\ntitle: One\n---\nbody",
        )
        .unwrap();
        fs::write(
            dir.path().join("two.md"),
            "---\nslug: same\ntitle: Two\n---\nbody",
        )
        .unwrap();

        assert!(check_content(&config_rooted_at(&dir)).is_err());
    }
}
