//! Stencil is a template cache for view frameworks. Templates are looked up by identifier (usually a
//! DOM-style selector like `#user-card`), compiled once into a render function, and memoized until
//! explicitly cleared.
//!
//! The cache also provides a renderer hook which a host view installs to render its templates,
//! whether they are already compiled functions or identifiers that need to be looked up.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use stencil::prelude::*;
//! use serde_json::json;
//!
//! let document = Document::parse(
//!     r#"<script id="greeting" type="template">Hello, <%= name %>!</script>"#,
//! );
//! let cache = Arc::new(TemplateCache::with_source(document));
//!
//! let mut view = View::new(cache.renderer())
//!     .template("#greeting")
//!     .data(json!({ "name": "world" }));
//!
//! assert_eq!(view.render().unwrap(), "Hello, world!");
//! assert!(cache.contains("#greeting"));
//! ```
pub mod colors;
pub mod config;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod view;

pub use error::Error;

/// Serde JSON is used for template data.
pub use serde_json;

/// Escape characters that are unsafe to print
/// inside an HTML template.
pub fn safe_html(string: &str) -> String {
    let mut result = String::with_capacity(string.len());

    for c in string.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            '`' => result.push_str("&#x60;"),
            c => result.push(c),
        }
    }

    result
}
