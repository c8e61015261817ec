use once_cell::sync::OnceCell;
use opentelemetry::metrics::{Counter, Histogram, Meter};
use opentelemetry::{KeyValue, global};
use tracing::info;

use crate::Stage;

struct StageMetrics {
    calls: Counter<u64>,
    duration_ms: Histogram<f64>,
    failures: Counter<u64>,
}

static METRICS: OnceCell<StageMetrics> = OnceCell::new();

fn handles() -> &'static StageMetrics {
    METRICS.get_or_init(|| {
        let meter: Meter = global::meter("blogwright.agents");
        StageMetrics {
            calls: meter
                .u64_counter("stage_calls_total")
                .with_description("Completion requests issued per stage and status")
                .init(),
            duration_ms: meter
                .f64_histogram("stage_duration_ms")
                .with_description("Completion round trip in milliseconds")
                .init(),
            failures: meter
                .u64_counter("stage_failures_total")
                .with_description("Completion requests that did not yield usable text")
                .init(),
        }
    })
}

/// Hint to operators that OTEL metrics export can be configured externally.
pub fn init_metrics_from_env(service_name: &str) {
    if std::env::var("BLOGWRIGHT_OTEL_METRICS_ENDPOINT").is_ok() {
        info!(
            target = "telemetry",
            "BLOGWRIGHT_OTEL_METRICS_ENDPOINT detected for {service_name}. Configure an OTLP meter provider in your deployment to export stage metrics."
        );
    }
}

/// Record one completion request (no-op if no meter provider is installed).
pub fn record_stage_call(stage: Stage, status: &str, duration_ms: u64) {
    let metrics = handles();
    let attrs = [
        KeyValue::new("stage", stage.as_str()),
        KeyValue::new("status", status.to_string()),
    ];

    metrics.calls.add(1, &attrs);
    metrics.duration_ms.record(duration_ms as f64, &attrs);

    if status != "success" {
        metrics.failures.add(1, &attrs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_a_provider_is_a_no_op() {
        for stage in Stage::ALL {
            record_stage_call(stage, "success", 12);
            record_stage_call(stage, "timeout", 30_000);
        }
    }
}
