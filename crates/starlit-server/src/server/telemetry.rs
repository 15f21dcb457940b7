//! # Telemetry
//!
//! Console logging is always on: a `tracing_subscriber::fmt` layer filtered by
//! `RUST_LOG` (default `info`). On top of it the binary can export spans and
//! metrics through OpenTelemetry.
//!
//! ## Feature matrix
//!
//! - `otel`: Export spans (handler spans, upstream calls) via OpenTelemetry.
//! - `metrics`: Export request counters and upstream latency.
//! - `stdout`: Print exported spans/metrics to stdout.
//!
//! `stdout` only makes sense together with `otel` or `metrics`. Without an
//! exporter feature the providers are still installed but export nothing.
//!
//! ```bash
//! cargo run -p starlit-server --features otel,metrics,stdout
//! ```

#[cfg(all(feature = "stdout", not(any(feature = "otel", feature = "metrics"))))]
compile_error!("The 'stdout' feature requires at least one of 'otel' or 'metrics' to be enabled.");

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SERVICE_NAME: &str = "starlit-server";

#[cfg(any(feature = "otel", feature = "metrics"))]
const EXPORT_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);

/// Exporter handles that must be flushed before the process exits.
pub struct TelemetryProviders {
    #[cfg(feature = "otel")]
    tracer_provider: opentelemetry_sdk::trace::SdkTracerProvider,
    #[cfg(feature = "metrics")]
    meter_provider: opentelemetry_sdk::metrics::SdkMeterProvider,
}

impl TelemetryProviders {
    /// Flushes and shuts down the exporters. Errors are printed, not
    /// returned, since the subscriber may already be gone.
    pub fn shutdown(self) {
        #[cfg(feature = "otel")]
        {
            let provider = &self.tracer_provider;
            if let Err(err) = provider.force_flush().and_then(|()| provider.shutdown()) {
                eprintln!("Error shutting down tracer: {err:#?}");
            }
        }

        #[cfg(feature = "metrics")]
        {
            let provider = &self.meter_provider;
            if let Err(err) = provider.force_flush().and_then(|()| provider.shutdown()) {
                eprintln!("Error shutting down meter: {err:#?}");
            }
        }
    }
}

/// Installs the global subscriber (and exporters, per feature).
///
/// Fails if a global subscriber is already set.
pub fn init_telemetry() -> anyhow::Result<TelemetryProviders> {
    let console = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_line_number(true)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_file(true)
        .pretty();

    let registry = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(console);

    #[cfg(feature = "otel")]
    let (registry, tracer_provider) = {
        use opentelemetry::trace::TracerProvider;

        opentelemetry::global::set_text_map_propagator(
            opentelemetry_sdk::propagation::TraceContextPropagator::new(),
        );
        let provider = tracer_provider();
        opentelemetry::global::set_tracer_provider(provider.clone());
        let layer = tracing_opentelemetry::layer()
            .with_tracer(provider.tracer_with_scope(scope()))
            .with_error_records_to_exceptions(true);
        (registry.with(layer), provider)
    };

    #[cfg(feature = "metrics")]
    let (registry, meter_provider) = {
        let provider = meter_provider();
        opentelemetry::global::set_meter_provider(provider.clone());
        let _ = METRICS.set(Metrics::new(&opentelemetry::global::meter_with_scope(
            scope(),
        )));
        let layer = tracing_opentelemetry::MetricsLayer::new(provider.clone());
        (registry.with(layer), provider)
    };

    registry.try_init()?;

    Ok(TelemetryProviders {
        #[cfg(feature = "otel")]
        tracer_provider,
        #[cfg(feature = "metrics")]
        meter_provider,
    })
}

#[cfg(any(feature = "otel", feature = "metrics"))]
fn scope() -> opentelemetry::InstrumentationScope {
    opentelemetry::InstrumentationScope::builder(SERVICE_NAME)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_schema_url(opentelemetry_semantic_conventions::SCHEMA_URL)
        .build()
}

#[cfg(any(feature = "otel", feature = "metrics"))]
fn resource() -> opentelemetry_sdk::Resource {
    use opentelemetry_semantic_conventions as semconv;

    opentelemetry_sdk::Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_schema_url(
            [opentelemetry::KeyValue::new(
                semconv::resource::SERVICE_VERSION,
                env!("CARGO_PKG_VERSION"),
            )],
            semconv::SCHEMA_URL,
        )
        .build()
}

#[cfg(feature = "otel")]
fn tracer_provider() -> opentelemetry_sdk::trace::SdkTracerProvider {
    use opentelemetry_sdk::trace::SdkTracerProvider;

    let builder = SdkTracerProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder = {
        use opentelemetry_sdk::trace::{BatchConfigBuilder, BatchSpanProcessor};

        let config = BatchConfigBuilder::default()
            .with_scheduled_delay(EXPORT_INTERVAL)
            .with_max_queue_size(1024)
            .build();
        builder.with_span_processor(
            BatchSpanProcessor::builder(opentelemetry_stdout::SpanExporter::default())
                .with_batch_config(config)
                .build(),
        )
    };

    builder.build()
}

#[cfg(feature = "metrics")]
fn meter_provider() -> opentelemetry_sdk::metrics::SdkMeterProvider {
    use opentelemetry_sdk::metrics::SdkMeterProvider;

    let builder = SdkMeterProvider::builder().with_resource(resource());

    #[cfg(feature = "stdout")]
    let builder = builder.with_reader(
        opentelemetry_sdk::metrics::PeriodicReader::builder(
            opentelemetry_stdout::MetricExporter::default(),
        )
        .with_interval(EXPORT_INTERVAL)
        .build(),
    );

    builder.build()
}

#[cfg(feature = "metrics")]
struct Metrics {
    requests: opentelemetry::metrics::Counter<u64>,
    upstream_errors: opentelemetry::metrics::Counter<u64>,
    placeholders: opentelemetry::metrics::Counter<u64>,
    upstream_duration_ms: opentelemetry::metrics::Histogram<f64>,
}

#[cfg(feature = "metrics")]
static METRICS: std::sync::OnceLock<Metrics> = std::sync::OnceLock::new();

#[cfg(feature = "metrics")]
impl Metrics {
    fn new(meter: &opentelemetry::metrics::Meter) -> Self {
        Self {
            requests: meter
                .u64_counter("quote_requests")
                .with_description("Quote requests received, any method")
                .build(),
            upstream_errors: meter
                .u64_counter("upstream_errors")
                .with_description("Failed or non-2xx calls to the generation API")
                .build(),
            placeholders: meter
                .u64_counter("placeholder_quotes")
                .with_description("Responses where the model output could not be parsed")
                .build(),
            upstream_duration_ms: meter
                .f64_histogram("upstream_duration")
                .with_unit("ms")
                .with_description("Round trip to the generation API")
                .build(),
        }
    }
}

// The helpers below are no-ops unless the `metrics` feature is enabled.

pub fn increment_requests() {
    #[cfg(feature = "metrics")]
    {
        if let Some(metrics) = METRICS.get() {
            metrics.requests.add(1, &[]);
        }
    }
}

pub fn increment_upstream_errors() {
    #[cfg(feature = "metrics")]
    {
        if let Some(metrics) = METRICS.get() {
            metrics.upstream_errors.add(1, &[]);
        }
    }
}

pub fn increment_placeholders() {
    #[cfg(feature = "metrics")]
    {
        if let Some(metrics) = METRICS.get() {
            metrics.placeholders.add(1, &[]);
        }
    }
}

pub fn record_upstream_duration(_duration_ms: f64) {
    #[cfg(feature = "metrics")]
    {
        if let Some(metrics) = METRICS.get() {
            metrics.upstream_duration_ms.record(_duration_ms, &[]);
        }
    }
}
