//! Prometheus-kompatible Metriken fuer Pforte
//!
//! Registrierte Metriken:
//! - `pforte_http_requests_total` – Counter: HTTP-Anfragen (method, path, status)
//! - `pforte_http_request_duration_seconds` – Histogram: HTTP-Antwortzeit
//! - `pforte_logins_total` – Counter: Login-Versuche (ergebnis)
//! - `pforte_signups_total` – Counter: Registrierungen (ergebnis)
//! - `pforte_gate_total` – Counter: Durchlaeufe des Auth-Gates (ergebnis)

use std::sync::Arc;

use anyhow::Result;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Alle Pforte-Prometheus-Metriken
#[derive(Clone)]
pub struct PforteMetrics {
    pub registry: Arc<Registry>,

    // HTTP-Metriken
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,

    // Auth-Metriken
    pub logins_total: IntCounterVec,
    pub signups_total: IntCounterVec,
    pub gate_total: IntCounterVec,
}

impl PforteMetrics {
    /// Erstellt und registriert alle Metriken in einer neuen Registry
    pub fn neu() -> Result<Self> {
        let registry = Registry::new();

        // --- HTTP-Metriken ---
        let http_requests_total = IntCounterVec::new(
            Opts::new("pforte_http_requests_total", "Gesamtanzahl HTTP-Anfragen"),
            &["method", "path", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "pforte_http_request_duration_seconds",
                "HTTP-Antwortzeit in Sekunden",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]),
            &["method", "path"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        // --- Auth-Metriken ---
        let logins_total = IntCounterVec::new(
            Opts::new("pforte_logins_total", "Login-Versuche nach Ergebnis"),
            &["ergebnis"],
        )?;
        registry.register(Box::new(logins_total.clone()))?;

        let signups_total = IntCounterVec::new(
            Opts::new("pforte_signups_total", "Registrierungen nach Ergebnis"),
            &["ergebnis"],
        )?;
        registry.register(Box::new(signups_total.clone()))?;

        let gate_total = IntCounterVec::new(
            Opts::new(
                "pforte_gate_total",
                "Anfragen an geschuetzte Routen nach Ergebnis des Auth-Gates",
            ),
            &["ergebnis"],
        )?;
        registry.register(Box::new(gate_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            http_requests_total,
            http_request_duration_seconds,
            logins_total,
            signups_total,
            gate_total,
        })
    }

    pub fn login(&self, ergebnis: &str) {
        self.logins_total.with_label_values(&[ergebnis]).inc();
    }

    pub fn signup(&self, ergebnis: &str) {
        self.signups_total.with_label_values(&[ergebnis]).inc();
    }

    pub fn gate(&self, ergebnis: &str) {
        self.gate_total.with_label_values(&[ergebnis]).inc();
    }

    /// Exportiert alle Metriken im Prometheus-Textformat
    pub fn exportieren(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Axum-Router fuer den `/metrics`-Endpunkt
pub fn metrics_router(metriken: PforteMetrics) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metriken)
}

async fn metrics_handler(State(metriken): State<PforteMetrics>) -> impl IntoResponse {
    match metriken.exportieren() {
        Ok(text) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4",
            )],
            text,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Metriken-Export fehlgeschlagen: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_counter_mit_labels() {
        let metriken = PforteMetrics::neu().unwrap();
        metriken.login("erfolg");
        metriken.login("erfolg");
        metriken.login("fehlgeschlagen");

        assert_eq!(metriken.logins_total.with_label_values(&["erfolg"]).get(), 2);
        assert_eq!(
            metriken.logins_total.with_label_values(&["fehlgeschlagen"]).get(),
            1
        );
    }

    #[test]
    fn http_counter_mit_labels() {
        let metriken = PforteMetrics::neu().unwrap();
        metriken
            .http_requests_total
            .with_label_values(&["GET", "/health", "200"])
            .inc();
        let wert = metriken
            .http_requests_total
            .with_label_values(&["GET", "/health", "200"])
            .get();
        assert_eq!(wert, 1);
    }

    #[test]
    fn metriken_export_prometheus_format() {
        let metriken = PforteMetrics::neu().unwrap();
        metriken.gate("erneuert");
        metriken.signup("erfolg");

        let output = metriken.exportieren().unwrap();
        assert!(output.contains("pforte_gate_total"));
        assert!(output.contains("pforte_signups_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn alle_metriken_in_registry_registriert() {
        let metriken = PforteMetrics::neu().unwrap();

        // Vec-Metriken erscheinen in gather() erst nach dem ersten Label-Zugriff
        metriken
            .http_requests_total
            .with_label_values(&["GET", "/test", "200"])
            .inc();
        metriken
            .http_request_duration_seconds
            .with_label_values(&["GET", "/test"])
            .observe(0.01);
        metriken.login("erfolg");
        metriken.signup("erfolg");
        metriken.gate("fehlt");

        let families = metriken.registry.gather();
        let namen: Vec<&str> = families.iter().map(|f| f.get_name()).collect();

        assert!(namen.contains(&"pforte_http_requests_total"));
        assert!(namen.contains(&"pforte_http_request_duration_seconds"));
        assert!(namen.contains(&"pforte_logins_total"));
        assert!(namen.contains(&"pforte_signups_total"));
        assert!(namen.contains(&"pforte_gate_total"));
    }
}
