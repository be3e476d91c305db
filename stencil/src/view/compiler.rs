//! Turning raw template text into something that renders.
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use serde_json::Value;

use super::Template;
use crate::Error;

type Function = dyn Fn(&Value) -> Result<String, Error> + Send + Sync;

/// A compiled template, ready to be called with data.
///
/// Cloning is cheap, all clones share the same function.
#[derive(Clone)]
pub struct RenderFn(Arc<Function>);

impl RenderFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<String, Error> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A render function which ignores its data.
    pub fn constant(text: impl ToString) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn call(&self, data: &Value) -> Result<String, Error> {
        (self.0)(data)
    }

    /// Both handles point to the same compiled function.
    pub fn ptr_eq(&self, other: &RenderFn) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for RenderFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RenderFn").finish()
    }
}

impl From<Template> for RenderFn {
    fn from(template: Template) -> Self {
        RenderFn::new(move |data| Ok(template.render(data)?))
    }
}

/// Opening and closing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    pub open: String,
    pub close: String,
}

impl Delimiters {
    pub fn new(open: impl ToString, close: impl ToString) -> Self {
        Self {
            open: open.to_string(),
            close: close.to_string(),
        }
    }
}

/// Compile options.
///
/// The cache hands these to the [`Compiler`] unchanged, and only on the first
/// compile of each template. [`Engine`] understands the tags and `variable`;
/// custom compilers can read anything else from `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub interpolate: Delimiters,
    pub escape: Delimiters,
    pub evaluate: Delimiters,
    /// Bind the data to this name instead of exposing its keys directly.
    pub variable: Option<String>,
    pub extra: HashMap<String, Value>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            interpolate: Delimiters::new("<%=", "%>"),
            escape: Delimiters::new("<%-", "%>"),
            evaluate: Delimiters::new("<%", "%>"),
            variable: None,
            extra: HashMap::new(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interpolate(mut self, open: impl ToString, close: impl ToString) -> Self {
        self.interpolate = Delimiters::new(open, close);
        self
    }

    pub fn escape(mut self, open: impl ToString, close: impl ToString) -> Self {
        self.escape = Delimiters::new(open, close);
        self
    }

    pub fn evaluate(mut self, open: impl ToString, close: impl ToString) -> Self {
        self.evaluate = Delimiters::new(open, close);
        self
    }

    pub fn variable(mut self, name: impl ToString) -> Self {
        self.variable = Some(name.to_string());
        self
    }

    pub fn set(mut self, key: impl ToString, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// Compiles raw template text into a [`RenderFn`].
pub trait Compiler: Send + Sync {
    fn compile(&self, raw: &str, options: Option<&Options>) -> Result<RenderFn, Error>;
}

impl<F> Compiler for F
where
    F: Fn(&str, Option<&Options>) -> Result<RenderFn, Error> + Send + Sync,
{
    fn compile(&self, raw: &str, options: Option<&Options>) -> Result<RenderFn, Error> {
        self(raw, options)
    }
}

/// Compiler for the built-in template language, see [`Template`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Compiler for Engine {
    fn compile(&self, raw: &str, options: Option<&Options>) -> Result<RenderFn, Error> {
        let template = match options {
            Some(options) => Template::compile(raw, options)?,
            None => Template::from_str(raw)?,
        };

        Ok(template.into())
    }
}
