//! Render-time data resolution: request path in, page data and metadata out.

use crate::{
    config::SiteConfig,
    content::{ContentStore, Post, PostSummary},
    routes,
};
use anyhow::Result;
use serde_json::{Value, json};

/// Listing page path.
pub const LISTING_PATH: &str = "/blog";

/// Prefix for single-post paths.
const POST_PREFIX: &str = "/blog/";

/// The data a page render needs, resolved once per request.
///
/// Created fresh for every server-rendered request, serialized once into
/// the response document, and read once on the client at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageData {
    /// The blog listing page
    Listing { posts: Vec<PostSummary> },

    /// A single post page; `None` when the slug matched no content
    Item { post: Option<Post> },

    /// A page that needs no content data
    #[default]
    Empty,
}

impl PageData {
    /// Whether there is anything worth serializing into the document.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// JSON form of the hydration payload.
    ///
    /// `Listing` → `{"posts": [...]}`, `Item` → `{"post": {...}|null}`,
    /// `Empty` → `{}`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Listing { posts } => json!({ "posts": posts }),
            Self::Item { post } => json!({ "post": post }),
            Self::Empty => json!({}),
        }
    }

    /// Parse a hydration payload back into page data.
    ///
    /// Anything that does not match a known shape is `Empty`; a corrupt
    /// payload degrades to a client-side fetch, never an error.
    pub fn from_json(value: &Value) -> Self {
        if let Some(posts) = value.get("posts") {
            if let Ok(posts) = serde_json::from_value(posts.clone()) {
                return Self::Listing { posts };
            }
        }
        if let Some(post) = value.get("post") {
            if post.is_null() {
                return Self::Item { post: None };
            }
            if let Ok(post) = serde_json::from_value(post.clone()) {
                return Self::Item { post: Some(post) };
            }
        }
        Self::Empty
    }
}

/// Resolved metadata for the document `<head>`.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
    pub canonical: Option<String>,
    pub og_image: Option<String>,
}

/// Resolve the content data a request path needs.
///
/// Only the listing path and single-post paths touch the store; every
/// other path renders without content data.
pub fn resolve_page_data(path: &str, store: &ContentStore) -> Result<PageData> {
    let path = normalize(path);

    if path == LISTING_PATH {
        return Ok(PageData::Listing {
            posts: store.list_summaries()?,
        });
    }

    if let Some(slug) = path.strip_prefix(POST_PREFIX) {
        if !slug.is_empty() && !slug.contains('/') {
            return Ok(PageData::Item {
                post: store.get_by_slug(slug)?,
            });
        }
    }

    Ok(PageData::Empty)
}

/// Resolve the page metadata for a request path.
///
/// A found post synthesizes its own metadata; everything else falls back
/// to the static route table, then to the global default.
pub fn resolve_meta(path: &str, data: &PageData, config: &SiteConfig) -> PageMeta {
    if let PageData::Item { post: Some(post) } = data {
        return meta_for_post(post, config);
    }

    let meta = routes::meta_for_path(normalize(path));
    PageMeta {
        title: meta.title.to_string(),
        description: meta.description.to_string(),
        keywords: meta.keywords.map(str::to_string),
        canonical: config
            .base
            .url
            .as_ref()
            .map(|url| format!("{url}{}", normalize(path))),
        og_image: meta.og_image.map(str::to_string),
    }
}

/// Synthesize metadata from a post's own fields.
fn meta_for_post(post: &Post, config: &SiteConfig) -> PageMeta {
    let description = if post.excerpt.is_empty() {
        config.base.description.clone()
    } else {
        post.excerpt.clone()
    };

    PageMeta {
        title: format!("{} | {}", post.title, config.base.title),
        description,
        keywords: (!post.tags.is_empty()).then(|| post.tags.join(", ")),
        canonical: config
            .base
            .url
            .as_ref()
            .map(|url| format!("{url}/blog/{}", post.slug)),
        og_image: None,
    }
}

/// Strip a trailing slash (except for the root path).
fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}
