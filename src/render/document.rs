//! Full HTML document assembly.
//!
//! Produces the response body for a server-rendered request: resolved
//! metadata in the `<head>` (every interpolated value HTML-escaped), the
//! rendered application markup in `#root`, and — only when the page
//! resolved any content data — one inline script assigning the
//! serialized payload to [`HYDRATION_GLOBAL`] so the client hydrates
//! without a redundant fetch.

use super::bridge::{HYDRATION_GLOBAL, SsrData};
use super::pages;
use super::resolver::{PageMeta, resolve_meta, resolve_page_data};
use crate::{config::SiteConfig, content::ContentStore};
use anyhow::Result;

/// Assembles full HTML documents for request paths.
pub struct DocumentAssembler<'a> {
    config: &'a SiteConfig,
    store: &'a ContentStore,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a SiteConfig, store: &'a ContentStore) -> Self {
        Self { config, store }
    }

    /// Render the complete document for a request path.
    ///
    /// A fresh bridge value is constructed per call; nothing leaks
    /// between requests. Errors propagate to the serving boundary,
    /// which responds with a generic failure page.
    pub fn assemble(&self, path: &str) -> Result<String> {
        let data = resolve_page_data(path, self.store)?;
        let meta = resolve_meta(path, &data, self.config);

        let bridge = SsrData::new(data);
        let markup = pages::render_app(path, &bridge);
        let payload = (!bridge.data().is_empty()).then(|| bridge.data().to_json().to_string());

        Ok(self.build_document(&meta, &markup, payload.as_deref()))
    }

    /// Wrap markup and metadata into the document shell.
    fn build_document(&self, meta: &PageMeta, markup: &str, payload: Option<&str>) -> String {
        let title = escape_html(&meta.title);
        let description = escape_html(&meta.description);
        let site_name = escape_html(&self.config.base.title);

        let mut head_extra = String::new();
        if let Some(keywords) = &meta.keywords {
            head_extra.push_str(&format!(
                "<meta name=\"keywords\" content=\"{}\">\n",
                escape_html(keywords)
            ));
        }
        if let Some(canonical) = &meta.canonical {
            head_extra.push_str(&format!(
                "<link rel=\"canonical\" href=\"{}\">\n",
                escape_html(canonical)
            ));
        }
        if let Some(image) = &meta.og_image {
            let image = escape_html(image);
            head_extra.push_str(&format!(
                "<meta property=\"og:image\" content=\"{image}\">\n<meta name=\"twitter:image\" content=\"{image}\">\n"
            ));
        }

        // The payload is embedded inside a script element, so escape the
        // one sequence that could close it early
        let data_script = payload
            .map(|json| {
                let json = json.replace('<', "\\u003c");
                format!("<script>window.{HYDRATION_GLOBAL} = {json};</script>\n")
            })
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<meta name="description" content="{description}">
{head_extra}<meta property="og:type" content="website">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
<meta property="og:site_name" content="{site_name}">
<meta name="twitter:card" content="summary_large_image">
<meta name="twitter:title" content="{title}">
<meta name="twitter:description" content="{description}">
<link rel="stylesheet" href="/dist/styles.css">
</head>
<body>
<div id="root">{markup}</div>
{data_script}<script type="module" src="/dist/client.js"></script>
</body>
</html>
"#
        )
    }
}

/// Escape a value for interpolation into HTML text or attributes.
pub(crate) fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
