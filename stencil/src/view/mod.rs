//! Templates, the template cache, and the view that renders them.
//!
//! Templates are looked up by identifier in a [`TemplateSource`], compiled by a [`Compiler`]
//! into a [`RenderFn`], and memoized by the [`TemplateCache`]. A [`View`] renders its template
//! through a [`Renderer`], the hook which the cache fills with [`TemplateCache::renderer`].
//!
//! # Example
//!
//! ```
//! # use stencil::view::*;
//! # use stencil::serde_json::json;
//! let template = Template::from_str("<h1><%- title %></h1>").unwrap();
//! let rendered = template.render(&json!({ "title": "Fish & Chips" })).unwrap();
//!
//! assert_eq!(rendered, "<h1>Fish &amp; Chips</h1>");
//! ```
pub mod cache;
pub mod compiler;
pub mod host;
pub mod renderer;
pub mod source;
pub mod template;

pub use cache::TemplateCache;
pub use compiler::{Compiler, Delimiters, Engine, Options, RenderFn};
pub use host::View;
pub use renderer::{Renderer, TemplateRef};
pub use source::{Directory, Document, TemplateSource};
pub use template::Template;
