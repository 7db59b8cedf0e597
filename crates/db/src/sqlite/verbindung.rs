//! Kurzlebige SQLite-Verbindungen
//!
//! Jede Operation oeffnet eine eigene Verbindung und schliesst sie nach
//! Abschluss wieder. Gleichzeitige Schreibzugriffe serialisiert SQLite selbst.

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection};
use tracing::{info, warn};

use crate::error::DbError;
use crate::repository::{DatabaseConfig, DbResult};

const USERS_TABELLE: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )";

/// Handle auf eine SQLite-Datei; haelt nur die Verbindungsoptionen
#[derive(Debug, Clone)]
pub struct SqliteDb {
    optionen: SqliteConnectOptions,
}

impl SqliteDb {
    /// Erstellt das Handle und legt die `users`-Tabelle an, falls sie fehlt
    pub async fn oeffnen(config: &DatabaseConfig) -> DbResult<Self> {
        let optionen = SqliteConnectOptions::new()
            .filename(&config.pfad)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);

        let db = Self { optionen };
        db.tabelle_anlegen().await?;

        info!(pfad = %config.pfad.display(), "SQLite-Datenbank bereit");
        Ok(db)
    }

    /// Legt die Benutzertabelle idempotent an
    pub async fn tabelle_anlegen(&self) -> DbResult<()> {
        let mut conn = self.verbinden().await?;
        let ergebnis = sqlx::query(USERS_TABELLE).execute(&mut conn).await;
        Self::schliessen(conn).await;
        ergebnis?;
        Ok(())
    }

    /// Prueft ob die Datenbank erreichbar ist (fuer den Health-Check)
    pub async fn erreichbar(&self) -> bool {
        match self.verbinden().await {
            Ok(mut conn) => {
                let ok = conn.ping().await.is_ok();
                Self::schliessen(conn).await;
                ok
            }
            Err(_) => false,
        }
    }

    pub(crate) async fn verbinden(&self) -> DbResult<SqliteConnection> {
        self.optionen.connect().await.map_err(DbError::from)
    }

    /// Schliesst eine Verbindung; ein Fehler beim Schliessen wird nur geloggt
    pub(crate) async fn schliessen(conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!(fehler = %e, "SQLite-Verbindung konnte nicht sauber geschlossen werden");
        }
    }
}
