//! The rendering hook views call to turn their template and data into text.
use std::sync::Arc;

use serde_json::Value;

use super::RenderFn;
use crate::Error;

/// What a view renders: either a compiled function or an identifier to look up.
#[derive(Debug, Clone)]
pub enum TemplateRef {
    Function(RenderFn),
    Selector(String),
}

impl TemplateRef {
    /// An empty selector doesn't refer to any template.
    pub fn is_empty(&self) -> bool {
        matches!(self, TemplateRef::Selector(selector) if selector.is_empty())
    }
}

impl From<&str> for TemplateRef {
    fn from(selector: &str) -> Self {
        TemplateRef::Selector(selector.to_string())
    }
}

impl From<String> for TemplateRef {
    fn from(selector: String) -> Self {
        TemplateRef::Selector(selector)
    }
}

impl From<RenderFn> for TemplateRef {
    fn from(render: RenderFn) -> Self {
        TemplateRef::Function(render)
    }
}

type Hook = dyn Fn(Option<&TemplateRef>, &Value) -> Result<String, Error> + Send + Sync;

/// Renderer hook installed on a view.
#[derive(Clone)]
pub struct Renderer(Arc<Hook>);

impl Renderer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<&TemplateRef>, &Value) -> Result<String, Error> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn render(&self, template: Option<&TemplateRef>, data: &Value) -> Result<String, Error> {
        (self.0)(template, data)
    }
}

impl Default for Renderer {
    /// Calls compiled templates directly. Selectors need a cache, see
    /// [`crate::view::TemplateCache::renderer`].
    fn default() -> Self {
        Renderer::new(
            |template, data| match template.filter(|template| !template.is_empty()) {
                Some(TemplateRef::Function(render)) => render.call(data),
                Some(TemplateRef::Selector(selector)) => Err(Error::Unresolved(selector.clone())),
                None => Err(Error::MissingTemplate),
            },
        )
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Renderer").finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_renderer() {
        let renderer = Renderer::default();
        let template = TemplateRef::from(RenderFn::constant("foo"));

        assert_eq!(renderer.render(Some(&template), &Value::Null).unwrap(), "foo");
        assert!(matches!(
            renderer.render(Some(&"#foo".into()), &Value::Null),
            Err(Error::Unresolved(selector)) if selector == "#foo"
        ));
        assert!(matches!(
            renderer.render(None, &Value::Null),
            Err(Error::MissingTemplate)
        ));
        assert!(matches!(
            renderer.render(Some(&"".into()), &Value::Null),
            Err(Error::MissingTemplate)
        ));
    }

    #[test]
    fn test_empty_selector() {
        assert!(TemplateRef::from("").is_empty());
        assert!(!TemplateRef::from("#foo").is_empty());
        assert!(!TemplateRef::from(RenderFn::constant("")).is_empty());
    }
}
