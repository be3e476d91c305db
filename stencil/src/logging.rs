//! Wrapper around `tracing_subscriber` for logging.
//!
//! Configures logging to go to stderr at the level set in the configuration (`INFO` by default).
//! Cache hits, misses and clears are logged at the `DEBUG` level.
//! If you prefer to use your own logging subscriber, don't initialize the `Logger`.
//!
//! ### Example
//!
//! ```rust
//! use stencil::prelude::*;
//!
//! Logger::init();
//! ```
use crate::config::get_config;
use once_cell::sync::OnceCell;
use tracing_subscriber::{filter::LevelFilter, fmt, util::SubscriberInitExt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub struct Logger;

impl Logger {
    /// Configure logging application-wide.
    ///
    /// Calling this multiple times is safe. Logger will be initialized only once.
    pub fn init() {
        INITIALIZED.get_or_init(|| {
            setup_logging();
            get_config().log_info();
        });
    }
}

fn setup_logging() {
    let config = get_config();
    let level = config
        .general
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::INFO);

    let subscriber = fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_ansi(config.general.tty)
        .with_file(false)
        .with_target(false)
        .finish();

    // Another subscriber may already be installed, e.g. by the host application.
    let _ = subscriber.try_init();
}
