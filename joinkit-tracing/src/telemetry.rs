use joinkit_types::models::telemetry::TelemetryConfig;
use joinkit_types::tracing::{self, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::TelemetryError;

// `RUST_LOG` wins over the configured filter
fn get_env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.filter))?)
}

// Init telemetry by setting a global handler
pub fn init_telemetry(
    app_name: Option<&str>,
    telemetry_config: Option<TelemetryConfig>,
) -> Result<(), TelemetryError> {
    let app_name = app_name.unwrap_or("joinkit");
    let config = telemetry_config.unwrap_or_default();

    let fmt_filter = get_env_filter(&config)?;
    let fmt_layer = fmt::layer().with_target(config.with_target);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(fmt_filter))
        .try_init()?;

    info!("Initialized telemetry for {app_name}");
    Ok(())
}

// Init telemetry with a closure without setting a global subscriber
pub fn init_telemetry_closure<T>(
    telemetry_config: Option<TelemetryConfig>,
    closure: impl FnOnce() -> T,
) -> Result<T, TelemetryError> {
    let config = telemetry_config.unwrap_or_default();

    let fmt_filter = get_env_filter(&config)?;
    let fmt_layer = fmt::layer()
        .with_target(config.with_target)
        .with_test_writer();

    let subscriber = tracing_subscriber::registry().with(fmt_layer.with_filter(fmt_filter));

    Ok(tracing::subscriber::with_default(subscriber, closure))
}
