//! Geschuetzte Anwendungsseite `/app`
//!
//! Beide Handler laufen hinter dem Auth-Gate.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
    Extension,
};

use crate::{
    cookies,
    error::{weiterleiten, WebError},
    gate::{AuthBenutzer, TokenEntfernt},
    seiten,
    state::AppState,
};

/// GET /app – nur mit gesetztem Session-Flag
pub async fn get_app(
    State(state): State<AppState>,
    Extension(benutzer): Extension<AuthBenutzer>,
    headers: HeaderMap,
) -> Response {
    let angemeldet = match cookies::cookie_wert(&headers, &state.cookies.session_name) {
        Some(id) => state.sessions.ist_angemeldet(&id).await,
        None => false,
    };

    if !angemeldet {
        tracing::debug!(user = %benutzer.username, "Token gueltig, aber kein Session-Flag");
        return WebError::NichtAngemeldet.into_response();
    }

    Html(seiten::app(&benutzer.username)).into_response()
}

/// POST /app – Logout
pub async fn post_app(
    State(state): State<AppState>,
    Extension(benutzer): Extension<AuthBenutzer>,
    headers: HeaderMap,
) -> Response {
    if let Some(id) = cookies::cookie_wert(&headers, &state.cookies.session_name) {
        state.sessions.abmelden(&id).await;
    }

    let mut antwort = weiterleiten("/login");
    cookies::anhaengen(antwort.headers_mut(), &state.cookies.token_loeschen());
    cookies::anhaengen(antwort.headers_mut(), &state.cookies.session_loeschen());
    antwort.extensions_mut().insert(TokenEntfernt);

    tracing::info!(user = %benutzer.username, "Benutzer abgemeldet");
    antwort
}
