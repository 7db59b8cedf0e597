//! Auth-Service fuer Pforte
//!
//! Zentraler Service fuer Registrierung und Login. Verbindet Credential-Store,
//! Passwort-Hasher und Token-Dienst.

use std::sync::Arc;

use pforte_db::{BenutzerRecord, DbError, NeuerBenutzer, UserRepository};

use crate::{
    error::{AuthError, AuthResult},
    password::PasswortHasher,
    token::TokenDienst,
};

/// Ergebnis eines erfolgreichen Logins
#[derive(Debug, Clone)]
pub struct Anmeldung {
    pub benutzer: BenutzerRecord,
    pub token: String,
}

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    hasher: PasswortHasher,
    tokens: TokenDienst,
}

impl AuthService {
    pub fn neu(
        user_repo: Arc<dyn UserRepository>,
        hasher: PasswortHasher,
        tokens: TokenDienst,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
        }
    }

    pub fn tokens(&self) -> &TokenDienst {
        &self.tokens
    }

    /// Registriert einen neuen Benutzer
    ///
    /// Die Eindeutigkeit des Namens prueft der Store (UNIQUE-Constraint).
    pub async fn registrieren(&self, username: &str, passwort: &str) -> AuthResult<BenutzerRecord> {
        eingaben_pruefen(username, passwort)?;

        let passwort_hash = self.hashen(passwort).await?;

        let benutzer = self
            .user_repo
            .create_user(NeuerBenutzer {
                username,
                password_hash: &passwort_hash,
            })
            .await
            .map_err(|e| match e {
                e if e.ist_eindeutigkeit() => AuthError::BenutzernameVergeben(username.to_string()),
                DbError::UngueltigeDaten(msg) => AuthError::Validierung(msg),
                e => AuthError::Datenbank(e),
            })?;

        tracing::info!(
            user_id = benutzer.id,
            username = %benutzer.username,
            "Neuer Benutzer registriert"
        );

        Ok(benutzer)
    }

    /// Meldet einen Benutzer an und stellt ein Token aus
    ///
    /// Unbekannter Benutzer und falsches Passwort sind getrennte Fehler; der
    /// Web-Layer antwortet auf beide identisch.
    pub async fn anmelden(&self, username: &str, passwort: &str) -> AuthResult<Anmeldung> {
        eingaben_pruefen(username, passwort)?;

        let benutzer = self
            .user_repo
            .find_user(username)
            .await?
            .ok_or_else(|| AuthError::BenutzerNichtGefunden(username.to_string()))?;

        if !self.verifizieren(passwort, &benutzer.password_hash).await? {
            tracing::warn!(username = %username, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let token = self.tokens.ausstellen(&benutzer.username)?;

        tracing::info!(
            user_id = benutzer.id,
            username = %benutzer.username,
            "Benutzer angemeldet"
        );

        Ok(Anmeldung { benutzer, token })
    }

    // Argon2 blockiert den Thread, daher im Blocking-Pool
    async fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let hasher = self.hasher.clone();
        let passwort = passwort.to_string();
        tokio::task::spawn_blocking(move || hasher.hashen(&passwort))
            .await
            .map_err(|e| AuthError::intern(format!("Hashing-Task abgebrochen: {e}")))?
    }

    async fn verifizieren(&self, passwort: &str, hash: &str) -> AuthResult<bool> {
        let hasher = self.hasher.clone();
        let passwort = passwort.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || hasher.verifizieren(&passwort, &hash))
            .await
            .map_err(|e| AuthError::intern(format!("Verifikations-Task abgebrochen: {e}")))
    }
}

fn eingaben_pruefen(username: &str, passwort: &str) -> AuthResult<()> {
    if username.is_empty() || passwort.is_empty() {
        return Err(AuthError::Validierung(
            "Benutzername und/oder Passwort fehlen".into(),
        ));
    }
    Ok(())
}
