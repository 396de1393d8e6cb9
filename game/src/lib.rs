//! Stratagem drill: memorise and enter directional call-in codes against a shrinking clock.

pub mod direction;
pub mod drill_core;
pub mod drill_ui;
pub mod input;
pub mod library;
pub mod logic;
pub mod round_timer;
pub mod script;
pub mod serde_duration;
pub mod session;
pub mod settings;
pub mod state;
pub mod view;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
