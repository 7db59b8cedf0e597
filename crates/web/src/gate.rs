//! Auth-Gate fuer geschuetzte Routen
//!
//! Ablauf pro Anfrage:
//! 1. Token aus `Authorization: Bearer` lesen, sonst aus dem Token-Cookie
//! 2. Signatur und Ablauf pruefen
//! 3. Neues Token ausstellen, Handler aufrufen, Token als Cookie anhaengen
//!
//! Fehlt das Token oder ist es abgelaufen, geht es zurueck zu `/login`.
//! Ein manipuliertes oder kaputtes Token ergibt 401 mit Diagnose.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use pforte_auth::TokenFehler;

use crate::{cookies, error::WebError, state::AppState};

/// Vom Gate authentifizierter Benutzer (als Request-Extension)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthBenutzer {
    pub username: String,
}

/// Response-Extension: der Handler hat das Token-Cookie selbst geloescht
///
/// Das Gate haengt dann kein erneuertes Token an.
#[derive(Debug, Clone, Copy)]
pub struct TokenEntfernt;

/// Axum-Middleware; einzuhaengen mit `middleware::from_fn_with_state`
pub async fn auth_gate(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = cookies::bearer_token(request.headers())
        .or_else(|| cookies::cookie_wert(request.headers(), &state.cookies.auth_name));

    let Some(token) = token else {
        state.metriken.gate("fehlt");
        tracing::debug!(pfad = %request.uri().path(), "Kein Token, Weiterleitung zum Login");
        return WebError::NichtAngemeldet.into_response();
    };

    let claims = match state.auth.tokens().validieren(&token) {
        Ok(claims) => claims,
        Err(TokenFehler::Abgelaufen { user }) => {
            state.metriken.gate("abgelaufen");
            tracing::info!(user = %user, "Token abgelaufen, Weiterleitung zum Login");
            let mut antwort = WebError::TokenAbgelaufen.into_response();
            cookies::anhaengen(antwort.headers_mut(), &state.cookies.token_loeschen());
            return antwort;
        }
        Err(TokenFehler::Ungueltig(diagnose)) => {
            state.metriken.gate("ungueltig");
            tracing::warn!(diagnose = %diagnose, "Ungueltiges Token abgewiesen");
            return WebError::TokenUngueltig(diagnose).into_response();
        }
    };

    let neues_token = match state.auth.tokens().ausstellen(&claims.user) {
        Ok(t) => t,
        Err(e) => return WebError::from(e).into_response(),
    };

    request.extensions_mut().insert(AuthBenutzer {
        username: claims.user,
    });

    let mut antwort = next.run(request).await;

    if antwort.extensions().get::<TokenEntfernt>().is_none() {
        cookies::anhaengen(antwort.headers_mut(), &state.cookies.token_setzen(&neues_token));
        state.metriken.gate("erneuert");
    } else {
        state.metriken.gate("abgemeldet");
    }

    antwort
}
