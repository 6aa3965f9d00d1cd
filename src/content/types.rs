//! Data types for blog content.
//!
//! These types are serialized to JSON for the `/api/posts` endpoints and
//! for the hydration payload embedded in server-rendered documents.

use serde::{Deserialize, Serialize};

/// Listing metadata for a single post, as returned by `/api/posts`.
///
/// Every field falls back to a default when the front-matter omits it,
/// so a listing entry always exists for every content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Unique URL-safe identifier (front-matter `slug`, or the file stem)
    pub slug: String,

    /// Post title ("Untitled" when absent)
    pub title: String,

    /// Publication date as ISO 8601 string (empty when absent)
    pub date: String,

    /// Short summary shown in listings (empty when absent)
    pub excerpt: String,

    /// Tags in front-matter order
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A full post: listing metadata plus the rendered body.
///
/// `content` is always the output of the markdown pipeline (rendered,
/// highlighted, sanitized). It is never raw author-supplied HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique URL-safe identifier
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date as ISO 8601 string
    pub date: String,

    /// Short summary
    pub excerpt: String,

    /// Tags in front-matter order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Sanitized HTML body
    pub content: String,
}

impl Post {
    /// The listing view of this post.
    pub fn summary(&self) -> PostSummary {
        PostSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            date: self.date.clone(),
            excerpt: self.excerpt.clone(),
            tags: self.tags.clone(),
        }
    }
}
