//! `[content]` section configuration.
//!
//! Locations of the markdown content, static assets, and build output.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[content]` section in vitrine.toml - content and asset locations.
///
/// All paths are relative to the site root until the config is
/// normalized after loading.
///
/// # Example
/// ```toml
/// [content]
/// dir = "content/blog"
/// public = "public"
/// dist = "dist"
/// resume = "resume.pdf"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    /// Site root directory (set from the CLI, not the config file).
    #[serde(skip)]
    #[educe(Default = defaults::content::root())]
    pub root: Option<PathBuf>,

    /// Directory of markdown posts.
    #[serde(default = "defaults::content::dir")]
    #[educe(Default = defaults::content::dir())]
    pub dir: PathBuf,

    /// Public static assets directory (images, favicons).
    #[serde(default = "defaults::content::public")]
    #[educe(Default = defaults::content::public())]
    pub public: PathBuf,

    /// Bundled client build output directory, mounted at `/dist`.
    #[serde(default = "defaults::content::dist")]
    #[educe(Default = defaults::content::dist())]
    pub dist: PathBuf,

    /// Resume file served at `/resume.pdf`.
    #[serde(default = "defaults::content::resume")]
    #[educe(Default = defaults::content::resume())]
    pub resume: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use std::path::PathBuf;

    #[test]
    fn test_content_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test site"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.content.dir, PathBuf::from("content/blog"));
        assert_eq!(config.content.public, PathBuf::from("public"));
        assert_eq!(config.content.dist, PathBuf::from("dist"));
        assert_eq!(config.content.resume, PathBuf::from("resume.pdf"));
    }

    #[test]
    fn test_content_config_overrides() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test site"

            [content]
            dir = "posts"
            resume = "cv.pdf"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.content.dir, PathBuf::from("posts"));
        assert_eq!(config.content.resume, PathBuf::from("cv.pdf"));
        // Untouched fields keep defaults
        assert_eq!(config.content.public, PathBuf::from("public"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            description = "Test site"

            [content]
            unknown_field = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
    }
}
