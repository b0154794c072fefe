//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Crates that log too much at `info` and below.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tower", "tonic", "opentelemetry", "sqlx"];

/// Install the global subscriber: one formatter, the level filter and, when a provider is given,
/// the OpenTelemetry bridge.
pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let (compact, json) = match config.logging.log_format {
        LogFormat::Compact => (
            Some(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true),
            ),
        ),
    };

    let otel = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.observability.otel_service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(env_filter(&config.logging.log_level))
        .with(compact)
        .with(json)
        .with(otel)
        .try_init()?;

    Ok(())
}

/// `RUST_LOG` style directives win when set in the environment.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    let mut directives = level.to_owned();

    for target in QUIET_TARGETS {
        directives.push(',');
        directives.push_str(target);
        directives.push_str("=warn");
    }

    directives
}
