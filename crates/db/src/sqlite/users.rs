//! SQLite-Implementierung des UserRepository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::Row as _;

use crate::error::DbError;
use crate::models::{BenutzerRecord, NeuerBenutzer};
use crate::repository::{DbResult, UserRepository};
use crate::sqlite::verbindung::SqliteDb;

/// Format von `CURRENT_TIMESTAMP` in SQLite
const SQLITE_ZEITFORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[async_trait]
impl UserRepository for SqliteDb {
    async fn create_user(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        if data.username.is_empty() {
            return Err(DbError::UngueltigeDaten("Benutzername ist leer".into()));
        }

        let mut conn = self.verbinden().await?;
        let ergebnis = sqlx::query(
            "INSERT INTO users (username, password) VALUES (?, ?)
             RETURNING id, username, password, created_at",
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(&mut conn)
        .await;
        Self::schliessen(conn).await;

        let row = ergebnis.map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("Benutzername '{}' bereits vergeben", data.username))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        let benutzer = row_to_benutzer(&row)?;
        tracing::debug!(user_id = benutzer.id, username = %benutzer.username, "Benutzer gespeichert");
        Ok(benutzer)
    }

    async fn find_user(&self, username: &str) -> DbResult<Option<BenutzerRecord>> {
        let mut conn = self.verbinden().await?;
        let ergebnis = sqlx::query(
            "SELECT id, username, password, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&mut conn)
        .await;
        Self::schliessen(conn).await;

        ergebnis?.map(|r| row_to_benutzer(&r)).transpose()
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    let created_at_str: String = row.try_get("created_at")?;
    let created_at = zeitstempel_parsen(&created_at_str)?;

    Ok(BenutzerRecord {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password")?,
        created_at,
    })
}

fn zeitstempel_parsen(wert: &str) -> DbResult<DateTime<Utc>> {
    if let Ok(naiv) = NaiveDateTime::parse_from_str(wert, SQLITE_ZEITFORMAT) {
        return Ok(naiv.and_utc());
    }
    DateTime::parse_from_rfc3339(wert)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{wert}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn sqlite_zeitstempel_wird_als_utc_gelesen() {
        let zeit = zeitstempel_parsen("2024-05-01 12:34:56").unwrap();
        assert_eq!(zeit.year(), 2024);
        assert_eq!(zeit.hour(), 12);
        assert_eq!(zeit.second(), 56);
    }

    #[test]
    fn rfc3339_zeitstempel_wird_akzeptiert() {
        let zeit = zeitstempel_parsen("2024-05-01T12:34:56+02:00").unwrap();
        assert_eq!(zeit.hour(), 10);
    }

    #[test]
    fn kaputter_zeitstempel_gibt_fehler() {
        assert!(matches!(zeitstempel_parsen("gestern"), Err(DbError::Intern(_))));
    }
}
