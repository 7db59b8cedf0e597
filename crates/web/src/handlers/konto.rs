//! Registrierung und Login

use axum::{
    extract::{rejection::FormRejection, State},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use pforte_auth::AuthError;

use crate::{
    cookies,
    error::{weiterleiten, WebError, WebResult},
    state::AppState,
};

/// Formularfelder von `/signup` und `/login`
///
/// Fehlende oder leere Felder ergeben 400 (Validierung), ebenso ein
/// fehlender oder nicht formularkodierter Body.
#[derive(Debug, Deserialize)]
pub struct Zugangsdaten {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Zugangsdaten {
    fn aus_formular(
        formular: Result<Form<Self>, FormRejection>,
    ) -> WebResult<(String, String)> {
        match formular {
            Ok(Form(daten)) => daten.pruefen(),
            Err(ablehnung) => {
                tracing::debug!(fehler = %ablehnung, "Formular nicht lesbar");
                Err(WebError::Validierung(
                    "Benutzername und Passwort sind erforderlich".into(),
                ))
            }
        }
    }

    fn pruefen(self) -> WebResult<(String, String)> {
        match (self.username, self.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok((u, p)),
            _ => Err(WebError::Validierung(
                "Benutzername und Passwort sind erforderlich".into(),
            )),
        }
    }
}

/// POST /signup
pub async fn post_signup(
    State(state): State<AppState>,
    formular: Result<Form<Zugangsdaten>, FormRejection>,
) -> WebResult<Response> {
    let (username, passwort) = Zugangsdaten::aus_formular(formular)?;

    match state.auth.registrieren(&username, &passwort).await {
        Ok(_) => {
            state.metriken.signup("erfolg");
            Ok(weiterleiten("/login"))
        }
        Err(e) => {
            let ergebnis = match e {
                AuthError::BenutzernameVergeben(_) => "vergeben",
                AuthError::Validierung(_) => "ungueltig",
                _ => "fehler",
            };
            state.metriken.signup(ergebnis);
            Err(e.into())
        }
    }
}

/// POST /login
pub async fn post_login(
    State(state): State<AppState>,
    formular: Result<Form<Zugangsdaten>, FormRejection>,
) -> WebResult<Response> {
    let (username, passwort) = Zugangsdaten::aus_formular(formular)?;

    let anmeldung = match state.auth.anmelden(&username, &passwort).await {
        Ok(a) => a,
        Err(e) => {
            let ergebnis = match e {
                AuthError::BenutzerNichtGefunden(_) | AuthError::UngueltigeAnmeldedaten => {
                    "abgelehnt"
                }
                _ => "fehler",
            };
            state.metriken.login(ergebnis);
            return Err(e.into());
        }
    };
    state.metriken.login("erfolg");

    let session_id = state.sessions.anmelden(&anmeldung.benutzer.username).await;

    let mut antwort = weiterleiten("/app");
    cookies::anhaengen(antwort.headers_mut(), &state.cookies.session_setzen(&session_id));
    cookies::anhaengen(
        antwort.headers_mut(),
        &state.cookies.token_setzen(&anmeldung.token),
    );
    Ok(antwort.into_response())
}
