//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

/// Ergebnis einer fehlgeschlagenen Token-Pruefung
///
/// Signatur- und Ablaufpruefung sind getrennt: ein korrekt signiertes, aber
/// abgelaufenes Token ist `Abgelaufen`, nicht `Ungueltig`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenFehler {
    #[error("Token ungueltig: {0}")]
    Ungueltig(String),

    #[error("Token abgelaufen (Benutzer '{user}')")]
    Abgelaufen { user: String },
}

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingaben ---
    #[error("Ungueltige Eingabe: {0}")]
    Validierung(String),

    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Authentifizierung ---
    #[error("Benutzername oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    #[error("Benutzer nicht gefunden: {0}")]
    BenutzerNichtGefunden(String),

    // --- Benutzerverwaltung ---
    #[error("Benutzername bereits vergeben: {0}")]
    BenutzernameVergeben(String),

    // --- Token ---
    #[error(transparent)]
    Token(#[from] TokenFehler),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] pforte_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
