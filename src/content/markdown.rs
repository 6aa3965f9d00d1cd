//! Markdown to sanitized HTML conversion.
//!
//! The pipeline is one-way and always sanitizing:
//!
//! ```text
//! markdown ──► pulldown-cmark events
//!                  │
//!                  ├── fenced code blocks ──► syntect (CSS classes)
//!                  ▼
//!              HTML string ──► ammonia ──► sanitized HTML
//! ```
//!
//! Sanitization strips script-executing constructs (`<script>`, event
//! handlers, `javascript:` URLs) while keeping safe formatting, links,
//! and the `class` attributes syntect needs for highlighted code.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Renders markdown bodies into sanitized HTML.
///
/// Holds the loaded syntax definitions, which are expensive to build, so
/// one renderer is shared per store rather than per call.
pub struct MarkdownRenderer {
    syntaxes: SyntaxSet,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer with the bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Convert a markdown body to sanitized HTML.
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_TASKLISTS;

        let mut events = Vec::new();
        let mut code = String::new();
        let mut lang: Option<String> = None;
        let mut in_code_block = false;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code.clear();
                    lang = match kind {
                        CodeBlockKind::Fenced(token) if !token.is_empty() => {
                            Some(token.to_string())
                        }
                        _ => None,
                    };
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    let html = self.highlight_block(&code, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                }
                Event::Text(text) if in_code_block => code.push_str(&text),
                other => events.push(other),
            }
        }

        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        sanitize(&html)
    }

    /// Highlight one code block, wrapped in `<pre><code>`.
    ///
    /// Resolution order for the syntax definition:
    /// 1. the declared language token
    /// 2. best-effort detection from the first line
    /// 3. plain text
    ///
    /// A highlighting failure never fails the render: the block falls
    /// back to escaped plain text.
    fn highlight_block(&self, code: &str, lang: Option<&str>) -> String {
        let syntax = lang
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .or_else(|| self.syntaxes.find_syntax_by_first_line(code))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());

        let class = match lang {
            Some(token) => format!("hljs language-{token}"),
            None => "hljs".to_string(),
        };

        let body = self
            .classed_html(code, syntax)
            .unwrap_or_else(|_| escape_text(code));

        format!("<pre><code class=\"{class}\">{body}</code></pre>")
    }

    /// Generate class-annotated HTML for a code block.
    fn classed_html(&self, code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

/// Strip script-executing constructs from rendered HTML.
///
/// Uses ammonia's default allow-list, extended to keep the `class`
/// attributes produced by the code highlighter.
fn sanitize(html: &str) -> String {
    ammonia::Builder::default()
        .add_tag_attributes("pre", ["class"])
        .add_tag_attributes("code", ["class"])
        .add_tag_attributes("span", ["class"])
        .clean(html)
        .to_string()
}

/// Escape text for inclusion in an HTML element body.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bold_paragraph() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("**bold**");

        assert_eq!(html.trim(), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn test_render_strips_script_tag() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("hello <script>alert(1)</script> world");

        assert!(!html.contains("<script"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn test_render_strips_event_handler() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render(r#"<img src="x.png" onerror="alert(1)">"#);

        assert!(!html.contains("onerror"));
    }

    #[test]
    fn test_render_strips_javascript_url() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[click](javascript:alert(1))");

        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_render_keeps_safe_link() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[docs](https://example.com)");

        assert!(html.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_render_highlights_known_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");

        assert!(html.contains("language-rust"));
        assert!(html.contains("<span class="));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_render_unknown_language_falls_back() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```not-a-real-lang\n#!/bin/sh\necho hi\n```");

        // The malformed tag is kept as a class but highlighting still ran
        assert!(html.contains("language-not-a-real-lang"));
        assert!(html.contains("echo hi"));
    }

    #[test]
    fn test_render_untagged_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain text block\n```");

        assert!(html.contains("<pre><code"));
        assert!(html.contains("plain text block"));
    }

    #[test]
    fn test_render_escapes_html_inside_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n<script>alert(1)</script>\n```");

        assert!(!html.contains("<script>"));
        assert!(html.contains("script"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }
}
