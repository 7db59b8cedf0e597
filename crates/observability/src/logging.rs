//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `PFORTE_LOG_LEVEL`: Filter-Direktive (z.B. `info` oder `pforte_web=debug`)
//! - `PFORTE_LOG_FORMAT`: Format (text/json)
//!
//! Die Umgebung hat Vorrang vor den Werten aus der Konfigurationsdatei.

use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "PFORTE_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "PFORTE_LOG_FORMAT";

/// Initialisiert das Logging-System.
///
/// Faellt auf `info` zurueck falls die Direktive nicht parsebar ist.
pub fn logging_initialisieren(level: &str, format: &str) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| format.to_string());

    match format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Validiert ob ein Log-Level-String gueltig ist.
///
/// Erlaubt sind die nackten Level sowie Filter-Direktiven mit `=`
/// (z.B. `info,pforte_web=debug`), die `EnvFilter` parsen kann.
pub fn log_level_gueltig(level: &str) -> bool {
    if matches!(level, "trace" | "debug" | "info" | "warn" | "error") {
        return true;
    }
    level.contains('=') && EnvFilter::try_new(level).is_ok()
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}
