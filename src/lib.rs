//! Vitrine - a server-rendered portfolio and blog engine.
//!
//! Markdown posts with YAML front matter are read from a content
//! directory, rendered to sanitized HTML, and served three ways: as a
//! JSON API, as fully-rendered HTML documents carrying a hydration
//! payload, and through a client-side cache layer that consumes both.

pub mod check;
pub mod cli;
pub mod client;
pub mod config;
pub mod content;
pub mod logger;
pub mod render;
pub mod routes;
pub mod serve;
