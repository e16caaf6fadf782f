//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggerSettings};

/// `EnvFilter` directive for `settings`. `RUST_LOG` wins over both
/// `override_filter` and `level`.
#[must_use]
pub fn filter_directive(settings: &LoggerSettings) -> String {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| settings.override_filter.clone())
        .unwrap_or_else(|| format!("{}={}", env!("CARGO_CRATE_NAME"), settings.level))
}

/// Installs the global subscriber.
///
/// Does nothing when logging is disabled or a subscriber is already
/// installed.
pub fn init(settings: &LoggerSettings) {
    if !settings.enable {
        return;
    }

    let filter = EnvFilter::new(filter_directive(settings));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match settings.format {
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    if installed.is_err() {
        tracing::debug!("logger_already_initialized");
    }
}
