//! Datenbankmodelle fuer Pforte
//!
//! Reine Datenuebertragungsobjekte fuer die `users`-Tabelle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Benutzer-Datensatz aus der Datenbank
///
/// Wird bei der Registrierung angelegt und danach nie veraendert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenutzerRecord {
    pub id: i64,
    pub username: String,
    /// PHC-String inkl. Salt, niemals Klartext
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Benutzers
#[derive(Debug, Clone)]
pub struct NeuerBenutzer<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
}
