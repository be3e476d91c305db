//! Global configuration.
//!
//! Loaded once from the file named by `STENCIL_CONFIG`, or from `stencil.toml` in the
//! working directory. Missing configuration falls back to defaults.
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [templates]
//! directory = "templates"
//! extension = "html"
//! ```
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::env::var;
use std::fs::read_to_string;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Error, Debug)]
pub enum Error {
    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config file not found")]
    Io(#[from] std::io::Error),

    #[error("config not found")]
    NoConfig,
}

/// Global configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    path: Option<PathBuf>,
    pub general: General,
    pub templates: Templates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct General {
    /// Print colors in logs.
    pub tty: bool,
    /// Default log level, overridable with `RUST_LOG`.
    pub log_level: String,
}

impl Default for General {
    fn default() -> Self {
        Self {
            tty: std::io::stderr().is_terminal(),
            log_level: "info".into(),
        }
    }
}

/// Where [`crate::view::Directory`] looks for templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Templates {
    pub directory: PathBuf,
    pub extension: Option<String>,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("templates"),
            extension: Some("html".into()),
        }
    }
}

impl Config {
    /// Find and load the configuration file.
    pub fn load() -> Result<Config, Error> {
        if let Ok(path) = var("STENCIL_CONFIG") {
            return Config::from_path(path);
        }

        for name in ["stencil.toml", "Stencil.toml"] {
            let path = PathBuf::from(name);
            if path.exists() {
                return Config::from_path(&path);
            }
        }

        Err(Error::NoConfig)
    }

    /// Load configuration from a specific file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Config, Error> {
        let file = read_to_string(path.as_ref())?;
        let mut config: Config = toml::from_str(&file)?;
        config.path = Some(path.as_ref().to_owned());

        Ok(config)
    }

    /// The file this configuration was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get() -> &'static Config {
        get_config()
    }

    pub fn log_info(&self) {
        match self.path {
            Some(ref path) => info!("configuration loaded from \"{}\"", path.display()),
            None => info!("no configuration loaded, using defaults"),
        }

        info!(
            "templates directory is \"{}\"",
            self.templates.directory.display()
        );
    }
}

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(|| or_default(Config::load()))
}

/// Fall back to defaults, warning when a configuration file exists but can't be used.
fn or_default(loaded: Result<Config, Error>) -> Config {
    match loaded {
        Ok(config) => config,
        Err(Error::NoConfig) => Config::default(),
        Err(err) => {
            warn!("{}, using defaults", err);
            Config::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;
    use tempdir::TempDir;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.templates.directory, PathBuf::from("templates"));
        assert_eq!(config.templates.extension.as_deref(), Some("html"));
        assert!(config.path().is_none());
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [templates]
            directory = "app/views"
            "#,
        )
        .unwrap();

        assert_eq!(config.templates.directory, PathBuf::from("app/views"));
        assert_eq!(config.templates.extension.as_deref(), Some("html"));
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_from_path() {
        let dir = TempDir::new("stencil-config").unwrap();
        let path = dir.path().join("stencil.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[general]\ntty = false\nlog_level = \"debug\"").unwrap();

        let config = Config::from_path(&path).unwrap();

        assert!(!config.general.tty);
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.path(), Some(path.as_path()));
    }

    #[test]
    fn test_bad_config_falls_back() {
        let dir = TempDir::new("stencil-config").unwrap();
        let path = dir.path().join("stencil.toml");
        std::fs::write(&path, "[templates]\ndirectory = 5\n").unwrap();

        let config = or_default(Config::from_path(&path));

        assert!(config.path().is_none());
        assert_eq!(config.templates.directory, PathBuf::from("templates"));

        let config = or_default(Err(Error::NoConfig));
        assert!(config.path().is_none());
    }

    #[test]
    fn test_bad_config() {
        let dir = TempDir::new("stencil-config").unwrap();
        let path = dir.path().join("stencil.toml");
        std::fs::write(&path, "[general\n").unwrap();

        assert!(matches!(Config::from_path(&path), Err(Error::Toml(_))));
        assert!(matches!(
            Config::from_path(dir.path().join("missing.toml")),
            Err(Error::Io(_))
        ));
    }
}
