//! pforte-server – Bibliotheks-Root
//!
//! Verdrahtet Credential-Store, Auth-Service, Session-Store und Web-Server
//! anhand der geladenen Konfiguration.

pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::ServerConfig;

use pforte_auth::{AuthService, PasswortHasher, SpeicherSessionStore, TokenDienst};
use pforte_db::{DatabaseConfig, SqliteDb};
use pforte_observability::{
    health::{BoxFuture, DbProbeFn},
    HealthState, PforteMetrics,
};
use pforte_web::{AppState, WebServer, WebServerKonfig};

/// Haelt den Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Baut alle Komponenten auf und liefert State und Health-Zustand
    ///
    /// Reihenfolge:
    /// 1. SQLite-Datei oeffnen, `users`-Tabelle anlegen
    /// 2. Hasher und Token-Dienst mit Geheimnis aufbauen
    /// 3. Session-Store und Metriken anlegen
    pub async fn aufbauen(&self) -> Result<(AppState, HealthState)> {
        self.config.validieren()?;

        let db = SqliteDb::oeffnen(&DatabaseConfig {
            pfad: self.config.datenbank.pfad.clone(),
        })
        .await
        .context("Datenbank konnte nicht geoeffnet werden")?;

        let hasher = PasswortHasher::neu(&self.config.auth.argon2)?;
        let geheimnis = self
            .config
            .geheimnis()
            .context("Kein Signatur-Geheimnis konfiguriert")?;
        let tokens = TokenDienst::neu(geheimnis.as_bytes(), self.config.auth.token_lebensdauer_sek)?;

        let auth = AuthService::neu(Arc::new(db.clone()), hasher, tokens);
        let metriken = PforteMetrics::neu()?;

        let state = AppState::neu(
            auth,
            SpeicherSessionStore::neu(),
            self.config.cookie_konfig(),
            metriken,
        );

        let probe: DbProbeFn = Arc::new(move || -> BoxFuture<'static, bool> {
            let db = db.clone();
            Box::pin(async move { db.erreichbar().await })
        });

        Ok((state, HealthState::neu(probe)))
    }

    /// Startet den Web-Server und laeuft bis zum Shutdown-Signal
    pub async fn starten(self) -> Result<()> {
        let (state, health) = self.aufbauen().await?;

        let konfig = WebServerKonfig {
            bind_addr: self.config.bind_adresse()?,
            statisches_verzeichnis: self.config.server.statisches_verzeichnis.clone(),
        };

        tracing::info!(
            addr = %konfig.bind_addr,
            datenbank = %self.config.datenbank.pfad.display(),
            token_lebensdauer_sek = self.config.auth.token_lebensdauer_sek,
            "Server startet"
        );

        WebServer::neu(konfig).starten(state, health).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn aufbauen_legt_datenbank_an() {
        let verzeichnis = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.auth.geheimnis = Some("test".into());
        config.auth.argon2.speicher_kib = 8;
        config.auth.argon2.iterationen = 1;
        config.datenbank.pfad = verzeichnis.path().join("users.db");

        let (state, _health) = Server::neu(config).aufbauen().await.unwrap();
        assert!(verzeichnis.path().join("users.db").exists());

        state.auth.registrieren("alice", "pw1").await.unwrap();
        assert!(state.auth.anmelden("alice", "pw1").await.is_ok());
    }

    #[tokio::test]
    async fn aufbauen_ohne_geheimnis_schlaegt_fehl() {
        let verzeichnis = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.datenbank.pfad = verzeichnis.path().join("users.db");

        assert!(Server::neu(config).aufbauen().await.is_err());
    }
}
