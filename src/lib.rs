//! A newsletter subscription form and the JSON api behind it.
//! Subscribers are forwarded to MailerLite, nothing is stored locally.

pub mod app;
pub mod config;
mod error;
pub mod provider_client;
pub mod templ_manager;
pub mod web;

pub use app::{App, AppState};
pub use error::{Error, Result};
pub use provider_client::ProviderClient;
pub use web::serve;

use tracing_subscriber::EnvFilter;

/// Human readable, compact logs. Defaults to `debug` unless `RUST_LOG` says otherwise.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

/// JSON logs, one object per line. Defaults to `info` unless `RUST_LOG` says otherwise.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
