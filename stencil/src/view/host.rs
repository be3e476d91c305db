//! A minimal view: a template, the data to render it with, and the element holding the result.
use serde_json::Value;

use super::{Renderer, TemplateRef};
use crate::Error;

#[derive(Debug, Clone)]
pub struct View {
    template: Option<TemplateRef>,
    data: Value,
    renderer: Renderer,
    el: String,
}

impl Default for View {
    fn default() -> Self {
        Self::new(Renderer::default())
    }
}

impl View {
    /// Create a view which renders through `renderer`.
    pub fn new(renderer: Renderer) -> Self {
        Self {
            template: None,
            data: Value::Null,
            renderer,
            el: String::new(),
        }
    }

    pub fn template(mut self, template: impl Into<TemplateRef>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    /// Replace the renderer hook.
    pub fn set_renderer(&mut self, renderer: Renderer) {
        self.renderer = renderer;
    }

    /// Render the template and keep the result in [`View::el`].
    ///
    /// Renderer errors are returned as-is, and the previous output is kept.
    pub fn render(&mut self) -> Result<&str, Error> {
        self.el = self.renderer.render(self.template.as_ref(), &self.data)?;
        Ok(&self.el)
    }

    /// Output of the last successful render.
    pub fn el(&self) -> &str {
        &self.el
    }
}
