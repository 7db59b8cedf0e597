//! Pforte Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use pforte_observability::logging_initialisieren;
use pforte_server::{
    config::{KonfigQuelle, ServerConfig},
    Server,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config_pfad = std::env::var("PFORTE_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let (config, quelle) = ServerConfig::laden(&config_pfad)?;

    logging_initialisieren(&config.logging.level, &config.logging.format);

    if quelle == KonfigQuelle::Standardwerte {
        tracing::warn!(
            pfad = %config_pfad,
            "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
        );
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "Pforte wird initialisiert"
    );

    if let Err(e) = config.validieren() {
        tracing::error!(fehler = %e, "Konfiguration ungueltig");
        return Err(e);
    }

    Server::neu(config).starten().await
}
