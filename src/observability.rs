//! Tracing subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Config;

/// Installs a formatting subscriber filtered by `config.trace_level`.
///
/// The level defaults to `"info"`. An unparsable directive falls back to the
/// default. Only the first call in a process takes effect; later calls and
/// hosts that installed their own subscriber are left untouched.
///
/// ```rust
/// use catalog_select::{observability::init_tracing, Config};
///
/// let config = Config {
///     trace_level: Some("catalog_select=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true));

    if let Err(err) = subscriber.try_init() {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}
