//! Server-side page markup.
//!
//! The minimal data-driven rendering of each route: plain semantic HTML,
//! every interpolated value escaped. Visual styling is the stylesheet's
//! job; this layer only consumes [`PageData`] through the bridge and
//! produces the markup the client hydrates over.

use super::bridge::SsrData;
use super::document::escape_html;
use super::resolver::{LISTING_PATH, PageData};
use crate::content::{Post, PostSummary};

/// Render the application markup for a request path.
///
/// The bridge value is this render's only data source; pages that need
/// nothing render static markup.
pub fn render_app(path: &str, bridge: &SsrData) -> String {
    let path = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };

    match path {
        "/" => render_home(),
        "/projects" => render_projects(),
        "/about" => render_about(),
        LISTING_PATH => render_listing(bridge.data()),
        _ if path.starts_with("/blog/") => render_post_page(bridge.data()),
        _ => render_not_found(path),
    }
}

fn render_home() -> String {
    concat!(
        r#"<header class="site-header"><nav>"#,
        r#"<a href="/">Home</a><a href="/projects">Projects</a>"#,
        r#"<a href="/about">About</a><a href="/blog">Blog</a>"#,
        r#"</nav></header>"#,
        r#"<main class="home"><h1>Hi, I build things for the web.</h1>"#,
        r#"<p>Engineer focused on fast, server-rendered experiences.</p>"#,
        r#"<a class="resume" href="/resume.pdf">Resume</a></main>"#,
    )
    .to_string()
}

fn render_projects() -> String {
    concat!(
        r#"<main class="projects"><h1>Projects</h1>"#,
        r#"<p>A collection of projects, tools, and experiments.</p></main>"#,
    )
    .to_string()
}

fn render_about() -> String {
    concat!(
        r#"<main class="about"><h1>About</h1>"#,
        r#"<p>Learn more about me, my skills, and my journey.</p></main>"#,
    )
    .to_string()
}

/// Blog listing: one article card per post summary.
fn render_listing(data: &PageData) -> String {
    let PageData::Listing { posts } = data else {
        // Listing data failed to resolve; the client fetches on mount
        return r#"<main class="blog"><h1>Blog</h1><p class="loading">Loading posts…</p></main>"#
            .to_string();
    };

    if posts.is_empty() {
        return r#"<main class="blog"><h1>Blog</h1><p>No posts yet. Check back soon!</p></main>"#
            .to_string();
    }

    let cards: String = posts.iter().map(render_card).collect();
    format!(r#"<main class="blog"><h1>Blog</h1><div class="posts">{cards}</div></main>"#)
}

fn render_card(post: &PostSummary) -> String {
    let tags: String = post
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
        .collect();

    format!(
        concat!(
            r#"<article class="card"><a href="/blog/{slug}">"#,
            r#"<time>{date}</time>{tags}"#,
            r#"<h2>{title}</h2><p>{excerpt}</p>"#,
            r#"</a></article>"#,
        ),
        slug = escape_html(&post.slug),
        date = escape_html(&post.date),
        tags = tags,
        title = escape_html(&post.title),
        excerpt = escape_html(&post.excerpt),
    )
}

/// Single post page, or the not-found body when the slug matched nothing.
fn render_post_page(data: &PageData) -> String {
    match data {
        PageData::Item { post: Some(post) } => render_post(post),
        PageData::Item { post: None } => concat!(
            r#"<main class="post"><h1>Post Not Found</h1>"#,
            r#"<p>That post doesn't exist.</p>"#,
            r#"<a href="/blog">&larr; Back to blog</a></main>"#,
        )
        .to_string(),
        _ => r#"<main class="post"><p class="loading">Loading…</p></main>"#.to_string(),
    }
}

fn render_post(post: &Post) -> String {
    let tags: String = post
        .tags
        .iter()
        .map(|tag| format!(r#"<span class="tag">{}</span>"#, escape_html(tag)))
        .collect();

    // post.content is already sanitized by the content pipeline and is
    // inserted as-is; everything else is escaped here
    format!(
        concat!(
            r#"<main class="post"><a href="/blog">&larr; Back to blog</a>"#,
            r#"<article><header><h1>{title}</h1>"#,
            r#"<time>{date}</time>{tags}</header>"#,
            r#"<div class="prose">{content}</div>"#,
            r#"</article></main>"#,
        ),
        title = escape_html(&post.title),
        date = escape_html(&post.date),
        tags = tags,
        content = post.content,
    )
}

fn render_not_found(path: &str) -> String {
    format!(
        concat!(
            r#"<main class="not-found"><h1>404</h1>"#,
            r#"<p>No page at {path}.</p><a href="/">Go home</a></main>"#,
        ),
        path = escape_html(path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(title: &str) -> PostSummary {
        PostSummary {
            slug: "a-slug".into(),
            title: title.into(),
            date: "2024-01-01".into(),
            excerpt: "an excerpt".into(),
            tags: vec!["rust".into()],
        }
    }

    #[test]
    fn test_listing_renders_cards() {
        let bridge = SsrData::new(PageData::Listing {
            posts: vec![summary("First"), summary("Second")],
        });
        let html = render_app("/blog", &bridge);

        assert!(html.contains("First"));
        assert!(html.contains("Second"));
        assert!(html.contains(r#"href="/blog/a-slug""#));
    }

    #[test]
    fn test_listing_escapes_content_fields() {
        let bridge = SsrData::new(PageData::Listing {
            posts: vec![summary("<script>alert(1)</script>")],
        });
        let html = render_app("/blog", &bridge);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_listing_message() {
        let bridge = SsrData::new(PageData::Listing { posts: vec![] });
        let html = render_app("/blog", &bridge);

        assert!(html.contains("No posts yet"));
    }

    #[test]
    fn test_post_page_inserts_rendered_body() {
        let bridge = SsrData::new(PageData::Item {
            post: Some(Post {
                slug: "p".into(),
                title: "Post".into(),
                date: "2024-01-01".into(),
                excerpt: "".into(),
                tags: vec![],
                content: "<p><strong>bold</strong></p>".into(),
            }),
        });
        let html = render_app("/blog/p", &bridge);

        assert!(html.contains("<p><strong>bold</strong></p>"));
        assert!(html.contains("<h1>Post</h1>"));
    }

    #[test]
    fn test_missing_post_renders_not_found_body() {
        let bridge = SsrData::new(PageData::Item { post: None });
        let html = render_app("/blog/nope", &bridge);

        assert!(html.contains("Post Not Found"));
    }

    #[test]
    fn test_static_pages_ignore_bridge() {
        let bridge = SsrData::empty();
        assert!(render_app("/", &bridge).contains("Hi, I build"));
        assert!(render_app("/projects", &bridge).contains("Projects"));
        assert!(render_app("/about", &bridge).contains("About"));
    }

    #[test]
    fn test_unknown_path_renders_404_with_escaped_path() {
        let bridge = SsrData::empty();
        let html = render_app("/x/<b>", &bridge);

        assert!(html.contains("404"));
        assert!(html.contains("&lt;b&gt;"));
    }
}
