use opentelemetry::{global, trace::TracerProvider, KeyValue};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{logs::SdkLoggerProvider, trace::SdkTracerProvider, Resource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::{
    config::Config,
    constants::{version::get_version, SERVICE_NAME},
};

/// keeps the otlp providers alive; call [`Telemetry::shutdown`] to flush them.
pub struct Telemetry {
    providers: Option<(SdkTracerProvider, SdkLoggerProvider)>,
}

impl Telemetry {
    pub fn shutdown(self) {
        if let Some((tracer_provider, log_provider)) = self.providers {
            if let Err(e) = tracer_provider.shutdown() {
                tracing::warn!(err = ?e, "an error occurred when shutting down tracer provider");
            }
            if let Err(e) = log_provider.shutdown() {
                tracing::warn!(err = ?e, "an error occurred when shutting down log provider");
            }
        }
    }
}

fn init_providers(
    config: &Config,
    endpoint: &str,
) -> Result<(SdkTracerProvider, SdkLoggerProvider), Box<dyn std::error::Error + Send + Sync>> {
    let resource = Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attribute(KeyValue::new("service.version", get_version()))
        .build();

    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();

    let log_provider = SdkLoggerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(log_exporter)
        .build();

    global::set_tracer_provider(tracer_provider.clone());

    Ok((tracer_provider, log_provider))
}

/// installs the global subscriber: env filter (`RUST_LOG`, default `info`) and fmt output,
/// plus otlp span and log export when an endpoint is configured.
pub fn init_telemetry(
    config: &Config,
) -> Result<Telemetry, Box<dyn std::error::Error + Send + Sync>> {
    let providers = config
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| init_providers(config, endpoint))
        .transpose()?;

    let tracer_layer = providers.as_ref().map(|(tracer_provider, _)| {
        tracing_opentelemetry::layer().with_tracer(tracer_provider.tracer(SERVICE_NAME))
    });
    let logger_layer = providers
        .as_ref()
        .map(|(_, log_provider)| OpenTelemetryTracingBridge::new(log_provider));

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(tracer_layer)
        .with(logger_layer)
        .try_init()?;

    match &config.otlp_endpoint {
        Some(endpoint) => tracing::info!(endpoint = %endpoint, "OpenTelemetry initialized successfully"),
        None => tracing::info!("no otlp endpoint configured, logging to stdout only"),
    }

    Ok(Telemetry { providers })
}
