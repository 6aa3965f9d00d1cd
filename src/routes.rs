//! Static route table with per-path page metadata.
//!
//! A handful of fixed routes; lookup is a linear scan, which is the
//! right tool at this scale.

/// SEO metadata attached to a route.
#[derive(Debug, Clone, Copy)]
pub struct RouteMeta {
    pub title: &'static str,
    pub description: &'static str,
    pub keywords: Option<&'static str>,
    pub og_image: Option<&'static str>,
}

/// A fixed route served with server-side rendering.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub path: &'static str,
    pub meta: RouteMeta,
}

/// Fallback metadata for paths missing from the table.
pub const DEFAULT_META: RouteMeta = RouteMeta {
    title: "Portfolio",
    description: "Software engineer portfolio and blog",
    keywords: None,
    og_image: None,
};

/// All statically-known routes.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        meta: RouteMeta {
            title: "Home | Portfolio",
            description: "Welcome to my portfolio. Building fast, server-rendered web experiences.",
            keywords: Some("software engineer, developer, portfolio, rust, web"),
            og_image: None,
        },
    },
    Route {
        path: "/projects",
        meta: RouteMeta {
            title: "Projects | Portfolio",
            description: "A collection of projects, tools, and experiments.",
            keywords: Some("projects, portfolio, web development, open source"),
            og_image: None,
        },
    },
    Route {
        path: "/about",
        meta: RouteMeta {
            title: "About | Portfolio",
            description: "Learn more about me, my skills, and my journey as a software engineer.",
            keywords: Some("about, software engineer, skills, experience"),
            og_image: None,
        },
    },
    Route {
        path: "/blog",
        meta: RouteMeta {
            title: "Blog | Portfolio",
            description: "Thoughts on systems programming, web infrastructure, and building things from scratch.",
            keywords: Some("blog, rust, web development, ssr"),
            og_image: None,
        },
    },
];

/// Look up the metadata for a path, falling back to [`DEFAULT_META`].
pub fn meta_for_path(path: &str) -> RouteMeta {
    ROUTES
        .iter()
        .find(|route| route.path == path)
        .map(|route| route.meta)
        .unwrap_or(DEFAULT_META)
}
