//! Server-side rendering pipeline.
//!
//! One render pass per request:
//!
//! ```text
//! request path
//!     │
//!     ▼
//! resolver ── asks the content store for the data the path needs
//!     │
//!     ▼
//! PageData ── wrapped in a fresh, request-scoped SsrData bridge
//!     │
//!     ├──► pages::render_app ── markup string
//!     ▼
//! document ── full HTML with escaped metadata + inline hydration payload
//! ```

mod bridge;
mod document;
mod pages;
mod resolver;

pub use bridge::{HYDRATION_GLOBAL, SsrData};
pub use document::DocumentAssembler;
pub use resolver::{PageData, PageMeta, resolve_meta, resolve_page_data};
