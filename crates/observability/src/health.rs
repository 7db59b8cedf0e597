//! Health-Check-Endpunkt fuer Pforte
//!
//! Endpoint: `GET /health`
//! Response: JSON mit Status, Version, Uptime und Erreichbarkeit der Datenbank

use std::{future::Future, pin::Pin, sync::Arc, time::Instant};

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Typ-Alias fuer eine geboxte Send-Future
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Funktor-Typ: prueft ob die Datenbank erreichbar ist
pub type DbProbeFn = Arc<dyn Fn() -> BoxFuture<'static, bool> + Send + Sync>;

/// Status des Health-Checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Antwort des Health-Check-Endpunkts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub db_connected: bool,
}

/// Geteilter Zustand fuer den Health-Check-Handler
#[derive(Clone)]
pub struct HealthState {
    start_time: Arc<Instant>,
    db_probe: DbProbeFn,
}

impl HealthState {
    pub fn neu(db_probe: DbProbeFn) -> Self {
        Self {
            start_time: Arc::new(Instant::now()),
            db_probe,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// Axum-Router fuer den `/health`-Endpunkt
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// `GET /health` – gibt den Serverstatus zurueck
async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let db_connected = (state.db_probe)().await;
    let status = if db_connected {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        db_connected,
    };

    // 200 auch bei degraded (Probe soll nicht failen)
    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn probe(ergebnis: bool) -> DbProbeFn {
        Arc::new(move || -> BoxFuture<'static, bool> { Box::pin(async move { ergebnis }) })
    }

    async fn abfragen(state: HealthState) -> HealthResponse {
        let antwort = health_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(antwort.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_mit_erreichbarer_db() {
        let antwort = abfragen(HealthState::neu(probe(true))).await;
        assert_eq!(antwort.status, HealthStatus::Healthy);
        assert!(antwort.db_connected);
        assert!(antwort.uptime_seconds < 5);
    }

    #[tokio::test]
    async fn health_ohne_db_ist_degraded() {
        let antwort = abfragen(HealthState::neu(probe(false))).await;
        assert_eq!(antwort.status, HealthStatus::Degraded);
        assert!(!antwort.db_connected);
    }

    #[test]
    fn health_response_serialisierung() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0".to_string(),
            uptime_seconds: 3600,
            db_connected: true,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"uptime_seconds\":3600"));
        assert!(json.contains("\"db_connected\":true"));
    }
}
