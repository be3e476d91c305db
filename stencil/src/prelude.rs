//! A collection of types which when imported make working with templates easy:
//!
//! ```
//! use stencil::prelude::*;
//! ```
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::logging::Logger;
pub use crate::view::{
    Compiler, Directory, Document, Engine, Options, RenderFn, Renderer, Template, TemplateCache,
    TemplateRef, TemplateSource, View,
};
