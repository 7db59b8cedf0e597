//! Fehlertypen der HTTP-Oberflaeche und ihre Abbildung auf Antworten

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

use pforte_auth::{AuthError, TokenFehler};

/// Hinweis fuer fehlgeschlagene Logins
pub const SIGNUP_HINWEIS: &str = "Noch kein Konto? Registrierung unter /signup";

/// Alle Fehler die ein Handler oder das Auth-Gate zurueckgeben kann
#[derive(Debug, Error)]
pub enum WebError {
    #[error("Ungueltige Eingabe: {0}")]
    Validierung(String),

    /// Unbekannter Benutzer oder falsches Passwort; beide Faelle sind fuer
    /// den Client ununterscheidbar
    #[error("Ungueltige Anmeldedaten")]
    Anmeldung,

    #[error("Nicht angemeldet")]
    NichtAngemeldet,

    #[error("Token abgelaufen")]
    TokenAbgelaufen,

    #[error("Token ungueltig: {0}")]
    TokenUngueltig(String),

    #[error("Benutzername bereits vergeben: {0}")]
    BenutzernameVergeben(String),

    #[error("Speicherfehler: {0}")]
    Speicher(String),

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

pub type WebResult<T> = Result<T, WebError>;

impl WebError {
    /// HTTP-Statuscode fuer den Fehler
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Validierung(_) => StatusCode::BAD_REQUEST,
            Self::Anmeldung | Self::TokenUngueltig(_) => StatusCode::UNAUTHORIZED,
            Self::NichtAngemeldet | Self::TokenAbgelaufen => StatusCode::FOUND,
            Self::BenutzernameVergeben(_) => StatusCode::CONFLICT,
            Self::Speicher(_) | Self::Intern(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for WebError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validierung(msg) => Self::Validierung(msg),
            AuthError::UngueltigeAnmeldedaten | AuthError::BenutzerNichtGefunden(_) => {
                Self::Anmeldung
            }
            AuthError::BenutzernameVergeben(name) => Self::BenutzernameVergeben(name),
            AuthError::Token(TokenFehler::Abgelaufen { .. }) => Self::TokenAbgelaufen,
            AuthError::Token(TokenFehler::Ungueltig(diagnose)) => Self::TokenUngueltig(diagnose),
            AuthError::Datenbank(e) => Self::Speicher(e.to_string()),
            e @ (AuthError::PasswortHashing(_)
            | AuthError::Konfiguration(_)
            | AuthError::Intern(_)) => Self::Intern(e.to_string()),
        }
    }
}

/// 302-Weiterleitung (wie `redirect()` in klassischen Web-Frameworks)
pub fn weiterleiten(ziel: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, ziel)]).into_response()
}

/// Fehlerantwort im einheitlichen JSON-Format
pub fn fehler_antwort(status: StatusCode, nachricht: &str) -> Response {
    (
        status,
        Json(json!({
            "error": {
                "code": status.as_u16(),
                "message": nachricht
            }
        })),
    )
        .into_response()
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        match self {
            Self::NichtAngemeldet | Self::TokenAbgelaufen => weiterleiten("/login"),
            Self::Anmeldung => (
                status,
                Json(json!({
                    "error": {
                        "code": status.as_u16(),
                        "message": "Ungueltige Anmeldedaten",
                        "hint": SIGNUP_HINWEIS
                    }
                })),
            )
                .into_response(),
            Self::TokenUngueltig(ref diagnose) => (
                status,
                Json(json!({
                    "error": {
                        "code": status.as_u16(),
                        "message": "Ungueltiges Token",
                        "diagnose": diagnose
                    }
                })),
            )
                .into_response(),
            Self::Speicher(ref msg) | Self::Intern(ref msg) => {
                tracing::error!(fehler = %msg, "Anfrage mit Serverfehler beendet");
                fehler_antwort(status, "Interner Serverfehler")
            }
            Self::Validierung(_) | Self::BenutzernameVergeben(_) => {
                fehler_antwort(status, &self.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pforte_db::DbError;

    #[test]
    fn unbekannt_und_falsches_passwort_sind_gleich() {
        let a = WebError::from(AuthError::BenutzerNichtGefunden("x".into()));
        let b = WebError::from(AuthError::UngueltigeAnmeldedaten);
        assert!(matches!(a, WebError::Anmeldung));
        assert!(matches!(b, WebError::Anmeldung));
        assert_eq!(a.http_status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn token_fehler_abbildung() {
        let abgelaufen = WebError::from(AuthError::Token(TokenFehler::Abgelaufen {
            user: "alice".into(),
        }));
        assert_eq!(abgelaufen.http_status(), StatusCode::FOUND);

        let ungueltig = WebError::from(AuthError::Token(TokenFehler::Ungueltig("sig".into())));
        assert_eq!(ungueltig.http_status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn statuscodes() {
        assert_eq!(
            WebError::Validierung("x".into()).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebError::BenutzernameVergeben("x".into()).http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            WebError::from(AuthError::Datenbank(DbError::intern("x"))).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn weiterleitung_zeigt_auf_login() {
        let antwort = WebError::NichtAngemeldet.into_response();
        assert_eq!(antwort.status(), StatusCode::FOUND);
        assert_eq!(antwort.headers()[header::LOCATION], "/login");
    }
}
