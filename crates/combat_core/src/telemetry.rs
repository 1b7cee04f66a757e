//! Telemetry bootstrap (tracing + optional Prometheus metrics).

use anyhow::Result;
use arena_data::configs::telemetry::TelemetryCfg;

pub struct TelemetryGuard;

pub fn init_telemetry(cfg: &TelemetryCfg) -> Result<TelemetryGuard> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};
    let level = cfg.log_level.clone().unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if cfg.json_logs.unwrap_or(false) {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };
    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
    if let Some(addr) = &cfg.metrics_addr {
        match addr.parse::<std::net::SocketAddr>() {
            Ok(addr) => {
                let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
                let _ = builder.with_http_listener(addr).install();
            }
            Err(_) => {
                metrics::counter!("arena.errors_total", "site" => "telemetry.parse_addr")
                    .increment(1);
            }
        }
    }
    tracing::info!(
        target: "telemetry",
        log_level = ?cfg.log_level,
        json_logs = ?cfg.json_logs,
        metrics_addr = ?cfg.metrics_addr,
        "telemetry initialized"
    );
    Ok(TelemetryGuard)
}
