use std::str::FromStr;

use opentelemetry::{global, trace::TracerProvider as _};
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::{
    metrics::{MeterProviderBuilder, PeriodicReader, SdkMeterProvider},
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
    Resource,
};
use tracing::Level;
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::{Result, SpeakError};

const SERVICE_NAME: &str = "speak-client";

fn resource() -> Resource {
    Resource::builder().with_service_name(SERVICE_NAME).build()
}

fn init_meter_provider(url: &str) -> Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_http()
        .with_endpoint(url)
        .with_protocol(Protocol::HttpBinary)
        .with_temporality(opentelemetry_sdk::metrics::Temporality::default())
        .build()
        .map_err(|e| SpeakError::config(format!("Cannot build OTLP metric exporter: {}", e)))?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(std::time::Duration::from_secs(5))
        .build();

    let meter_provider = MeterProviderBuilder::default()
        .with_resource(resource())
        .with_reader(reader)
        .build();

    global::set_meter_provider(meter_provider.clone());

    Ok(meter_provider)
}

fn init_tracer_provider(url: &str) -> Result<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(url)
        .with_protocol(Protocol::HttpBinary)
        .build()
        .map_err(|e| SpeakError::config(format!("Cannot build OTLP span exporter: {}", e)))?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource())
        .with_batch_exporter(exporter)
        .build())
}

pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim())
        .map_err(|_| SpeakError::config(format!("Unknown log level: {}", level)))
}

/// Install the global subscriber. Logs go to stderr; spans and metrics are
/// also exported when `otel_http_url` is set.
pub fn init_tracing_subscriber(log_level: &str, otel_http_url: &Option<String>) -> Result<OtelGuard> {
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            parse_level(log_level)?,
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if let Some(url) = otel_http_url {
        let tracer_provider = init_tracer_provider(url)?;
        let meter_provider = init_meter_provider(url)?;

        let tracer = tracer_provider.tracer(SERVICE_NAME);

        registry
            .with(MetricsLayer::new(meter_provider.clone()))
            .with(OpenTelemetryLayer::new(tracer))
            .init();

        Ok(OtelGuard {
            tracer_provider: Some(tracer_provider),
            meter_provider: Some(meter_provider),
        })
    } else {
        registry.init();

        Ok(OtelGuard {
            tracer_provider: None,
            meter_provider: None,
        })
    }
}

/// Flushes exporters when dropped.
pub struct OtelGuard {
    tracer_provider: Option<SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Failed to shut down tracer provider: {e:?}");
            }
        }
        if let Some(provider) = self.meter_provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Failed to shut down meter provider: {e:?}");
            }
        }
    }
}
