//! Repository-Trait und Datenbank-Konfiguration
//!
//! Das Repository-Pattern entkoppelt den Auth-Service von der konkreten
//! Speicher-Implementierung. Tests koennen eigene In-Memory-Varianten
//! einsetzen.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::DbError;
use crate::models::{BenutzerRecord, NeuerBenutzer};

/// Result-Alias fuer alle Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Pfad zur SQLite-Datei (wird bei Bedarf angelegt)
    pub pfad: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            pfad: PathBuf::from("users.db"),
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Legt einen neuen Benutzer an.
    ///
    /// Ein bereits vergebener Benutzername liefert `DbError::Eindeutigkeit`.
    async fn create_user(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord>;

    /// Sucht einen Benutzer anhand seines Namens.
    ///
    /// `Ok(None)` ist der normale "nicht gefunden"-Fall und kein Fehler.
    async fn find_user(&self, username: &str) -> DbResult<Option<BenutzerRecord>>;
}
