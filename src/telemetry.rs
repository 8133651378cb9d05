use crate::config::{LogFormat, TelemetryConfig};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{KeyValue, global};
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    logs::SdkLoggerProvider,
    metrics::{PeriodicReader, SdkMeterProvider},
    propagation::TraceContextPropagator,
    trace::SdkTracerProvider,
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE: &str = "contact-intake";

/// Keeps the OTLP providers alive; call `shutdown` before exit to flush them.
#[derive(Debug, Default)]
#[must_use]
pub struct TelemetryGuard {
    providers: Option<Providers>,
}

#[derive(Debug)]
struct Providers {
    tracer: SdkTracerProvider,
    meter: SdkMeterProvider,
    logger: SdkLoggerProvider,
}

impl TelemetryGuard {
    /// Flushes and shuts down the telemetry providers.
    pub fn shutdown(self) {
        let Some(providers) = self.providers else {
            return;
        };

        if let Err(e) = providers.tracer.shutdown() {
            tracing::warn!(error = %e, "Failed to shut down tracer provider");
        }
        if let Err(e) = providers.meter.shutdown() {
            tracing::warn!(error = %e, "Failed to shut down meter provider");
        }
        if let Err(e) = providers.logger.shutdown() {
            tracing::warn!(error = %e, "Failed to shut down logger provider");
        }
    }
}

fn build_providers(endpoint: &str) -> anyhow::Result<Providers> {
    let resource = Resource::builder()
        .with_attributes(vec![
            KeyValue::new(SERVICE_NAME, SERVICE),
            KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
        ])
        .build();

    global::set_text_map_propagator(TraceContextPropagator::new());

    let tracer = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(opentelemetry_otlp::SpanExporter::builder().with_tonic().with_endpoint(endpoint).build()?)
        .build();
    global::set_tracer_provider(tracer.clone());

    let metric_exporter = opentelemetry_otlp::MetricExporter::builder().with_tonic().with_endpoint(endpoint).build()?;
    let meter = SdkMeterProvider::builder()
        .with_resource(resource.clone())
        .with_reader(PeriodicReader::builder(metric_exporter).build())
        .build();
    global::set_meter_provider(meter.clone());

    let logger = SdkLoggerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(opentelemetry_otlp::LogExporter::builder().with_tonic().with_endpoint(endpoint).build()?)
        .build();

    Ok(Providers { tracer, meter, logger })
}

/// Initializes logging and, when an OTLP endpoint is configured, trace/metric/log export.
///
/// # Errors
/// Returns an error if an exporter cannot be built or a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    // Exporter internals are kept quiet so they do not feed back into the log bridge.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into())
        .add_directive("hyper=warn".parse()?)
        .add_directive("h2=warn".parse()?)
        .add_directive("tonic=warn".parse()?)
        .add_directive("aws_smithy_runtime=warn".parse()?)
        .add_directive("opentelemetry=warn".parse()?);

    let providers = config.otlp_endpoint.as_deref().map(build_providers).transpose()?;

    let trace_layer = providers.as_ref().map(|p| OpenTelemetryLayer::new(p.tracer.tracer(SERVICE)));
    let log_layer = providers.as_ref().map(|p| OpenTelemetryTracingBridge::new(&p.logger));

    let registry = Registry::default().with(filter).with(trace_layer).with(log_layer);

    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init()?,
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init()?,
    }

    if let Some(endpoint) = &config.otlp_endpoint {
        tracing::info!(endpoint = %endpoint, "OTLP export enabled");
    }

    Ok(TelemetryGuard { providers })
}
