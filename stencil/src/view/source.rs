//! Where raw templates come from.
//!
//! [`Document`] finds templates embedded in HTML by element id (`#user-card`),
//! [`Directory`] reads them from files on disk.
use std::collections::HashMap;
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::get_config;
use crate::Error;

// One pattern per tag, so markup nested inside a script is kept whole.
static SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>").unwrap());
static TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<template\b([^>]*)>(.*?)</template\s*>").unwrap());
static ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// Resolves template identifiers to raw template text.
pub trait TemplateSource: Send + Sync {
    /// Find the template. `None` if it doesn't exist.
    fn find(&self, identifier: &str) -> Result<Option<String>, Error>;
}

impl<T: TemplateSource + ?Sized> TemplateSource for Arc<T> {
    fn find(&self, identifier: &str) -> Result<Option<String>, Error> {
        (**self).find(identifier)
    }
}

impl<T: TemplateSource + ?Sized> TemplateSource for Box<T> {
    fn find(&self, identifier: &str) -> Result<Option<String>, Error> {
        (**self).find(identifier)
    }
}

/// Templates embedded in an HTML document, e.g.
///
/// ```html
/// <script id="user-card" type="text/template"><%- name %></script>
/// ```
///
/// Only id selectors are supported.
#[derive(Debug, Default, Clone)]
pub struct Document {
    elements: HashMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect all `<script>` and `<template>` elements with an `id`.
    ///
    /// When an id is used more than once, the first element wins.
    pub fn parse(html: &str) -> Self {
        let mut elements = vec![];

        for tag in [&SCRIPT, &TEMPLATE] {
            for element in tag.captures_iter(html) {
                let (Some(whole), Some(attributes), Some(content)) =
                    (element.get(0), element.get(1), element.get(2))
                else {
                    continue;
                };

                let id = ID
                    .captures(attributes.as_str())
                    .and_then(|id| id.get(1).or(id.get(2)));

                if let Some(id) = id {
                    elements.push((whole.start(), id.as_str(), content.as_str()));
                }
            }
        }

        elements.sort_by_key(|(start, _, _)| *start);

        let mut document = Document::new();
        for (_, id, content) in elements {
            document
                .elements
                .entry(id.to_string())
                .or_insert_with(|| content.to_string());
        }

        document
    }

    pub fn insert(&mut self, id: impl ToString, content: impl ToString) -> &mut Self {
        self.elements.insert(id.to_string(), content.to_string());
        self
    }

    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.elements.remove(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl TemplateSource for Document {
    fn find(&self, identifier: &str) -> Result<Option<String>, Error> {
        Ok(identifier
            .strip_prefix('#')
            .and_then(|id| self.elements.get(id))
            .cloned())
    }
}

/// Templates stored as files, identified by their path relative to `root`.
#[derive(Debug, Clone)]
pub struct Directory {
    root: PathBuf,
    extension: Option<String>,
}

impl Directory {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_owned(),
            extension: None,
        }
    }

    /// Directory from the `[templates]` section of the configuration.
    pub fn from_config() -> Self {
        let config = &get_config().templates;

        Self {
            root: config.directory.clone(),
            extension: config.extension.clone(),
        }
    }

    /// Extension to add to identifiers that don't have one.
    pub fn extension(mut self, extension: impl ToString) -> Self {
        self.extension = Some(extension.to_string());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, identifier: &str) -> Option<PathBuf> {
        let relative = Path::new(identifier);

        if identifier.is_empty()
            || !relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)))
        {
            return None;
        }

        let mut path = self.root.join(relative);

        if let Some(ref extension) = self.extension {
            if path.extension().is_none() {
                path.set_extension(extension);
            }
        }

        Some(path)
    }
}

impl TemplateSource for Directory {
    fn find(&self, identifier: &str) -> Result<Option<String>, Error> {
        let path = match self.path(identifier) {
            Some(path) => path,
            None => return Ok(None),
        };

        match read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
