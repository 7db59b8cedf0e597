//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Bis auf das Signatur-Geheimnis
//! haben alle Felder Standardwerte; das Geheimnis kann auch ueber
//! `PFORTE_SECRET` gesetzt werden.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use pforte_auth::{Argon2Parameter, STANDARD_LEBENSDAUER_SEK};
use pforte_observability::logging::{log_format_gueltig, log_level_gueltig};
use pforte_web::CookieKonfig;

/// Umgebungsvariable fuer das Signatur-Geheimnis
pub const GEHEIMNIS_ENV: &str = "PFORTE_SECRET";

/// Herkunft einer geladenen Konfiguration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KonfigQuelle {
    Datei,
    /// Datei fehlt, alle Werte sind Standardwerte
    Standardwerte,
}

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP-Einstellungen
    pub server: ServerEinstellungen,
    /// Credential-Store
    pub datenbank: DatenbankEinstellungen,
    /// Tokens, Cookies und Passwort-Hashing
    pub auth: AuthEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    pub bind_adresse: String,
    pub port: u16,
    /// Verzeichnis fuer `/static/*`
    pub statisches_verzeichnis: PathBuf,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "127.0.0.1".into(),
            port: 5000,
            statisches_verzeichnis: PathBuf::from("static"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Pfad zur SQLite-Datei (wird bei Bedarf angelegt)
    pub pfad: PathBuf,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            pfad: PathBuf::from("users.db"),
        }
    }
}

/// Auth-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// HMAC-Geheimnis fuer die Token-Signatur (Pflicht)
    pub geheimnis: Option<String>,
    /// Gueltigkeit eines Tokens in Sekunden
    pub token_lebensdauer_sek: i64,
    pub cookie_name: String,
    pub session_cookie_name: String,
    /// `Secure`-Attribut fuer alle Cookies (nur hinter HTTPS aktivieren)
    pub cookie_secure: bool,
    pub argon2: Argon2Parameter,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            geheimnis: None,
            token_lebensdauer_sek: STANDARD_LEBENSDAUER_SEK,
            cookie_name: "auth_token".into(),
            session_cookie_name: "session".into(),
            cookie_secure: false,
            argon2: Argon2Parameter::default(),
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    /// Ein gesetztes `PFORTE_SECRET` ersetzt `auth.geheimnis`.
    ///
    /// Loggt nicht selbst; die [`KonfigQuelle`] meldet der Aufrufer nach der
    /// Logging-Initialisierung.
    pub fn laden(pfad: &str) -> anyhow::Result<(Self, KonfigQuelle)> {
        let (mut config, quelle) = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => (
                toml::from_str::<Self>(&inhalt)
                    .with_context(|| format!("Konfigurationsfehler in '{pfad}'"))?,
                KonfigQuelle::Datei,
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                (Self::default(), KonfigQuelle::Standardwerte)
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Konfigurationsdatei '{pfad}' nicht lesbar"))
            }
        };

        config.geheimnis_uebernehmen(std::env::var(GEHEIMNIS_ENV).ok());
        Ok((config, quelle))
    }

    /// Uebernimmt ein Geheimnis aus der Umgebung, falls gesetzt und nicht leer
    pub fn geheimnis_uebernehmen(&mut self, aus_umgebung: Option<String>) {
        if let Some(geheimnis) = aus_umgebung.filter(|g| !g.is_empty()) {
            self.auth.geheimnis = Some(geheimnis);
        }
    }

    /// Prueft die Konfiguration vor dem Start
    pub fn validieren(&self) -> anyhow::Result<()> {
        if self.geheimnis().is_none() {
            bail!("Kein Signatur-Geheimnis konfiguriert ([auth] geheimnis oder {GEHEIMNIS_ENV})");
        }
        if self.auth.token_lebensdauer_sek <= 0 {
            bail!(
                "auth.token_lebensdauer_sek muss positiv sein (war {})",
                self.auth.token_lebensdauer_sek
            );
        }
        if !log_level_gueltig(&self.logging.level) {
            bail!("Unbekanntes Log-Level '{}'", self.logging.level);
        }
        if !log_format_gueltig(&self.logging.format) {
            bail!("Unbekanntes Log-Format '{}'", self.logging.format);
        }
        self.bind_adresse()?;
        Ok(())
    }

    /// Nicht-leeres Signatur-Geheimnis
    pub fn geheimnis(&self) -> Option<&str> {
        self.auth.geheimnis.as_deref().filter(|g| !g.is_empty())
    }

    /// Gibt die vollstaendige Bind-Adresse des HTTP-Servers zurueck
    pub fn bind_adresse(&self) -> anyhow::Result<SocketAddr> {
        let adresse = format!("{}:{}", self.server.bind_adresse, self.server.port);
        adresse
            .parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{adresse}'"))
    }

    pub fn cookie_konfig(&self) -> CookieKonfig {
        CookieKonfig {
            auth_name: self.auth.cookie_name.clone(),
            session_name: self.auth.session_cookie_name.clone(),
            secure: self.auth.cookie_secure,
            token_max_age_sek: self.auth.token_lebensdauer_sek,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mit_geheimnis() -> ServerConfig {
        let mut cfg = ServerConfig::default();
        cfg.auth.geheimnis = Some("geheim".into());
        cfg
    }

    #[test]
    fn standardwerte() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.server.port, 5000);
        assert_eq!(cfg.datenbank.pfad, PathBuf::from("users.db"));
        assert_eq!(cfg.auth.token_lebensdauer_sek, 120);
        assert_eq!(cfg.auth.cookie_name, "auth_token");
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(
            cfg.bind_adresse().unwrap(),
            "127.0.0.1:5000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn ohne_geheimnis_kein_start() {
        let cfg = ServerConfig::default();
        let fehler = cfg.validieren().unwrap_err().to_string();
        assert!(fehler.contains("Geheimnis"));

        let mut leer = ServerConfig::default();
        leer.auth.geheimnis = Some(String::new());
        assert!(leer.validieren().is_err());

        assert!(mit_geheimnis().validieren().is_ok());
    }

    #[test]
    fn geheimnis_aus_umgebung_hat_vorrang() {
        let mut cfg = mit_geheimnis();
        cfg.geheimnis_uebernehmen(Some("aus-env".into()));
        assert_eq!(cfg.geheimnis(), Some("aus-env"));

        cfg.geheimnis_uebernehmen(Some(String::new()));
        assert_eq!(cfg.geheimnis(), Some("aus-env"));

        cfg.geheimnis_uebernehmen(None);
        assert_eq!(cfg.geheimnis(), Some("aus-env"));
    }

    #[test]
    fn ungueltige_werte_werden_abgelehnt() {
        let mut cfg = mit_geheimnis();
        cfg.auth.token_lebensdauer_sek = 0;
        assert!(cfg.validieren().is_err());

        let mut cfg = mit_geheimnis();
        cfg.logging.format = "xml".into();
        assert!(cfg.validieren().is_err());

        let mut cfg = mit_geheimnis();
        cfg.server.bind_adresse = "kein host".into();
        assert!(cfg.validieren().is_err());

        let mut cfg = mit_geheimnis();
        cfg.logging.level = "pforte_web=laut".into();
        assert!(cfg.validieren().is_err());
    }

    #[test]
    fn filter_direktive_als_log_level() {
        let mut cfg = mit_geheimnis();
        cfg.logging.level = "info,pforte_web=debug".into();
        assert!(cfg.validieren().is_ok());
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [server]
            port = 8000

            [auth]
            geheimnis = "s3cr3t"
            cookie_secure = true

            [auth.argon2]
            speicher_kib = 19456
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.geheimnis(), Some("s3cr3t"));
        assert!(cfg.cookie_konfig().secure);
        assert_eq!(cfg.auth.argon2.speicher_kib, 19456);
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.auth.argon2.iterationen, 3);
        assert_eq!(cfg.server.bind_adresse, "127.0.0.1");
        assert_eq!(cfg.auth.token_lebensdauer_sek, 120);
    }

    #[test]
    fn fehlende_datei_ergibt_standardwerte() {
        let verzeichnis = tempfile::tempdir().unwrap();
        let pfad = verzeichnis.path().join("gibt-es-nicht.toml");
        let (cfg, quelle) = ServerConfig::laden(pfad.to_str().unwrap()).unwrap();
        assert_eq!(quelle, KonfigQuelle::Standardwerte);
        assert_eq!(cfg.server.port, 5000);
    }

    #[test]
    fn vorhandene_datei_wird_gelesen() {
        let verzeichnis = tempfile::tempdir().unwrap();
        let pfad = verzeichnis.path().join("config.toml");
        std::fs::write(&pfad, "[server]\nport = 8081\n").unwrap();

        let (cfg, quelle) = ServerConfig::laden(pfad.to_str().unwrap()).unwrap();
        assert_eq!(quelle, KonfigQuelle::Datei);
        assert_eq!(cfg.server.port, 8081);
    }

    #[test]
    fn kaputte_datei_ist_ein_fehler() {
        let verzeichnis = tempfile::tempdir().unwrap();
        let pfad = verzeichnis.path().join("config.toml");
        std::fs::write(&pfad, "[server\nport = ").unwrap();
        assert!(ServerConfig::laden(pfad.to_str().unwrap()).is_err());
    }
}
