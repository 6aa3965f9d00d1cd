//! Front-matter extraction for markdown content files.
//!
//! A content file may start with a fenced YAML block:
//!
//! ```text
//! ---
//! title: My First Post
//! date: "2024-01-01"
//! tags: [rust, web]
//! ---
//! body text...
//! ```
//!
//! Every field is optional. Malformed YAML is treated the same as no
//! front-matter at all: the file still produces a post, with defaults.

use serde::Deserialize;

/// Fence delimiter for the front-matter block.
const FENCE: &str = "---";

/// Parsed front-matter fields. All optional, defaulted by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Explicit slug override (defaults to the file stem)
    pub slug: Option<String>,

    /// Post title
    pub title: Option<String>,

    /// Publication date as ISO 8601 string
    pub date: Option<String>,

    /// Short summary for listings
    pub excerpt: Option<String>,

    /// Tags, kept in authoring order
    pub tags: Option<Vec<String>>,
}

/// Split a source file into front-matter and body.
///
/// Returns the parsed front-matter (defaulted when absent or malformed)
/// and the body text with the front-matter block removed.
pub fn extract(source: &str) -> (FrontMatter, &str) {
    let Some((block, body)) = split_fenced(source) else {
        return (FrontMatter::default(), source);
    };

    // Malformed metadata is never fatal: fall back to defaults
    let matter = serde_yaml::from_str(block).unwrap_or_default();
    (matter, body)
}

/// Find the fenced block at the start of the source.
///
/// The opening fence must be the first line; the closing fence must be a
/// line of its own. Returns `None` when either fence is missing.
fn split_fenced(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix(FENCE)?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    for (offset, _) in rest.match_indices(FENCE) {
        // Closing fence must start a line
        let at_line_start = offset == 0 || rest[..offset].ends_with('\n');
        if !at_line_start {
            continue;
        }

        let after = &rest[offset + FENCE.len()..];
        let body = after.strip_prefix("\r\n").or_else(|| after.strip_prefix('\n'));
        if let Some(body) = body {
            return Some((&rest[..offset], body));
        }
        if after.is_empty() {
            return Some((&rest[..offset], after));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_full_front_matter() {
        let source = "---\nslug: custom\ntitle: Hi\ndate: \"2024-01-01\"\nexcerpt: short\ntags: [a, b]\n---\nbody here";
        let (matter, body) = extract(source);

        assert_eq!(matter.slug.as_deref(), Some("custom"));
        assert_eq!(matter.title.as_deref(), Some("Hi"));
        assert_eq!(matter.date.as_deref(), Some("2024-01-01"));
        assert_eq!(matter.excerpt.as_deref(), Some("short"));
        assert_eq!(matter.tags, Some(vec!["a".into(), "b".into()]));
        assert_eq!(body, "body here");
    }

    #[test]
    fn test_extract_no_front_matter() {
        let source = "just a body\nwith lines";
        let (matter, body) = extract(source);

        assert!(matter.title.is_none());
        assert_eq!(body, source);
    }

    #[test]
    fn test_extract_unterminated_fence() {
        let source = "---\ntitle: Hi\nno closing fence";
        let (matter, body) = extract(source);

        assert!(matter.title.is_none());
        assert_eq!(body, source);
    }

    #[test]
    fn test_extract_malformed_yaml_defaults() {
        let source = "---\ntitle: [unclosed\n---\nbody";
        let (matter, body) = extract(source);

        assert!(matter.title.is_none());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_extract_partial_fields() {
        let source = "---\ntitle: Only Title\n---\nbody";
        let (matter, _) = extract(source);

        assert_eq!(matter.title.as_deref(), Some("Only Title"));
        assert!(matter.date.is_none());
        assert!(matter.tags.is_none());
    }

    #[test]
    fn test_extract_unquoted_date_parses_as_string() {
        let source = "---\ndate: 2024-01-15\n---\nbody";
        let (matter, _) = extract(source);

        assert_eq!(matter.date.as_deref(), Some("2024-01-15"));
    }

    #[test]
    fn test_extract_fence_at_end_of_file() {
        let source = "---\ntitle: Hi\n---";
        let (matter, body) = extract(source);

        assert_eq!(matter.title.as_deref(), Some("Hi"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_dashes_inside_body_not_a_fence() {
        let source = "no front matter\n---\nstill the body";
        let (matter, body) = extract(source);

        assert!(matter.title.is_none());
        assert_eq!(body, source);
    }
}
