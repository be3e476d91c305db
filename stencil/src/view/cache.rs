//! Template cache.
//!
//! Using the cache ensures that templates are only loaded and compiled once, no matter
//! how many times they are rendered. Entries stay cached until they are cleared with
//! [`TemplateCache::clear`] or [`TemplateCache::clear_all`].
//!
//! The cache is an ordinary value: create one, share it with an [`Arc`], and install
//! [`TemplateCache::renderer`] on the views which should use it.
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use super::{
    Compiler, Directory, Engine, Options, RenderFn, Renderer, TemplateRef, TemplateSource,
};
use crate::colors::MaybeColorize;
use crate::Error;

/// A compiled template and the options it was compiled with.
#[derive(Debug, Clone)]
struct CachedTemplate {
    compiled: RenderFn,
    options: Option<Options>,
}

/// Templates cache.
pub struct TemplateCache {
    source: Box<dyn TemplateSource>,
    compiler: Box<dyn Compiler>,
    templates: Mutex<HashMap<String, CachedTemplate>>,
}

impl TemplateCache {
    /// Create new empty template cache.
    pub fn new(source: impl TemplateSource + 'static, compiler: impl Compiler + 'static) -> Self {
        Self {
            source: Box::new(source),
            compiler: Box::new(compiler),
            templates: Mutex::new(HashMap::new()),
        }
    }

    /// Create new empty template cache which compiles templates with the
    /// built-in [`Engine`].
    pub fn with_source(source: impl TemplateSource + 'static) -> Self {
        Self::new(source, Engine)
    }

    /// Cache for templates stored in the directory set in the configuration.
    pub fn from_config() -> Self {
        Self::with_source(Directory::from_config())
    }

    /// Retrieve a template from the cache. If the template isn't cached, it will be loaded
    /// from the source and compiled with `options`.
    ///
    /// Options are only used on the first compile. Once a template is cached, the cached function
    /// is returned whatever options are passed, until the template is cleared.
    ///
    /// The lock is held while loading and compiling so the same template is never
    /// loaded twice, even if requested from multiple threads at once. Compilers must not
    /// call back into the same cache.
    pub fn get(&self, identifier: &str, options: Option<&Options>) -> Result<RenderFn, Error> {
        let mut templates = self.templates.lock();

        if let Some(template) = templates.get(identifier) {
            if options.is_some() && options != template.options.as_ref() {
                debug!(
                    "template \"{}\" is already compiled, ignoring new options",
                    identifier
                );
            }

            return Ok(template.compiled.clone());
        }

        let raw = self.load_template(identifier)?;
        let compiled = self.compile_template(&raw, options)?;

        templates.insert(
            identifier.to_string(),
            CachedTemplate {
                compiled: compiled.clone(),
                options: options.cloned(),
            },
        );

        debug!("{} template \"{}\"", "compiled".green(), identifier);

        Ok(compiled)
    }

    /// Remove templates from the cache. Passing no identifiers clears the whole cache.
    ///
    /// Identifiers which aren't cached are ignored.
    pub fn clear<I, S>(&self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut identifiers = identifiers.into_iter().peekable();

        if identifiers.peek().is_none() {
            self.clear_all();
            return;
        }

        let mut templates = self.templates.lock();

        for identifier in identifiers {
            if templates.remove(identifier.as_ref()).is_some() {
                debug!("{} template \"{}\"", "cleared".yellow(), identifier.as_ref());
            }
        }
    }

    /// Remove all templates from the cache.
    pub fn clear_all(&self) {
        let mut templates = self.templates.lock();
        let cleared = templates.len();
        templates.clear();

        debug!("{} {} templates", "cleared".yellow(), cleared);
    }

    /// Read the raw template from the source.
    pub fn load_template(&self, identifier: &str) -> Result<String, Error> {
        debug!("loading template \"{}\"", identifier);

        match self.source.find(identifier)? {
            Some(raw) => Ok(raw),
            None => {
                debug!("template \"{}\" {}", identifier, "not found".red());
                Err(Error::TemplateNotFound(identifier.to_string()))
            }
        }
    }

    /// Compile the raw template with the options passed to [`TemplateCache::get`].
    pub fn compile_template(&self, raw: &str, options: Option<&Options>) -> Result<RenderFn, Error> {
        self.compiler.compile(raw, options)
    }

    /// Render a template with the given data.
    ///
    /// Compiled templates are called directly and never touch the cache. Selectors are looked
    /// up with [`TemplateCache::get`].
    pub fn render(&self, template: Option<&TemplateRef>, data: &Value) -> Result<String, Error> {
        match template.filter(|template| !template.is_empty()) {
            Some(TemplateRef::Function(render)) => render.call(data),
            Some(TemplateRef::Selector(selector)) => self.get(selector, None)?.call(data),
            None => Err(Error::MissingTemplate),
        }
    }

    /// Renderer hook for views which renders through this cache.
    pub fn renderer(self: &Arc<Self>) -> Renderer {
        let cache = Arc::clone(self);
        Renderer::new(move |template, data| cache.render(template, data))
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.templates.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.lock().is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.templates.lock().contains_key(identifier)
    }

    /// Identifiers of all cached templates, in no particular order.
    pub fn identifiers(&self) -> Vec<String> {
        self.templates.lock().keys().cloned().collect()
    }
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCache")
            .field("templates", &self.identifiers())
            .finish()
    }
}
