//! Global error type.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not find template: \"{0}\"")]
    TemplateNotFound(String),

    #[error("Cannot render the template since its false, null or undefined.")]
    MissingTemplate,

    #[error("template \"{0}\" is a selector, but the renderer only accepts compiled templates")]
    Unresolved(String),

    #[error("{0}")]
    Template(#[from] crate::view::template::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Config(#[from] crate::config::Error),

    #[error("{0}")]
    Error(#[from] Box<dyn std::error::Error + Sync + Send>),
}
