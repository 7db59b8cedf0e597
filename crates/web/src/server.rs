//! Axum HTTP-Server fuer Pforte

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use axum::{middleware, Router};

use pforte_observability::{
    health_router, metrics_router, request_timing_layer, timing_middleware, HealthState,
};

use crate::{routes::app_router, state::AppState};

/// Web-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct WebServerKonfig {
    pub bind_addr: SocketAddr,
    /// Verzeichnis fuer `/static/*`
    pub statisches_verzeichnis: PathBuf,
}

impl Default for WebServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            statisches_verzeichnis: PathBuf::from("static"),
        }
    }
}

/// Baut die vollstaendige Anwendung inkl. `/health`, `/metrics` und Layern
pub fn anwendung(state: AppState, health: HealthState, konfig: &WebServerKonfig) -> Router {
    let metriken = state.metriken.clone();

    app_router(state, &konfig.statisches_verzeichnis)
        .merge(health_router(health))
        .merge(metrics_router(metriken.clone()))
        .layer(middleware::from_fn_with_state(metriken, timing_middleware))
        .layer(request_timing_layer())
}

/// Axum HTTP-Server fuer Pforte
pub struct WebServer {
    konfig: WebServerKonfig,
}

impl WebServer {
    pub fn neu(konfig: WebServerKonfig) -> Self {
        Self { konfig }
    }

    /// Startet den Server und laeuft bis Ctrl-C
    pub async fn starten(self, state: AppState, health: HealthState) -> Result<()> {
        let app = anwendung(state, health, &self.konfig);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "Pforte-Webserver gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Pforte-Webserver beendet");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht installiert werden");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown-Signal empfangen");
}
