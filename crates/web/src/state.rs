//! Geteilter Axum-State

use std::sync::Arc;

use pforte_auth::{AuthService, SessionStore};
use pforte_observability::PforteMetrics;

use crate::cookies::CookieKonfig;

/// Axum-State fuer alle Pforte-Routen
///
/// Geheimnis (im `AuthService`) und Session-Store werden hier explizit
/// hineingereicht; es gibt keinen prozessweiten Zustand.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub sessions: Arc<dyn SessionStore>,
    pub cookies: CookieKonfig,
    pub metriken: PforteMetrics,
}

impl AppState {
    pub fn neu(
        auth: AuthService,
        sessions: Arc<dyn SessionStore>,
        cookies: CookieKonfig,
        metriken: PforteMetrics,
    ) -> Self {
        Self {
            auth,
            sessions,
            cookies,
            metriken,
        }
    }
}
