//! Server-seitige Sessions
//!
//! Eine Session haelt nur das `logged_in`-Flag eines Clients, adressiert ueber
//! eine zufaellige Session-ID im Cookie. Das Flag ist ein zweiter, redundanter
//! Indikator neben dem Token und nicht massgeblich fuer die Authentifizierung.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tokio::sync::RwLock;

/// Standard-Lebensdauer eines Session-Eintrags: 24 Stunden
pub const SESSION_TTL_SEKUNDEN: i64 = 24 * 60 * 60;

/// Schnittstelle zum Session-Speicher
///
/// Wird dem Web-Layer bei der Konstruktion uebergeben.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Legt eine neue Session mit gesetztem `logged_in`-Flag an und gibt deren ID zurueck
    async fn anmelden(&self, user: &str) -> String;

    /// Gibt `true` zurueck wenn die Session existiert und angemeldet ist
    async fn ist_angemeldet(&self, session_id: &str) -> bool;

    /// Entfernt die Session (Logout)
    async fn abmelden(&self, session_id: &str);
}

#[derive(Debug, Clone)]
struct SessionEintrag {
    user: String,
    logged_in: bool,
    erstellt_am: DateTime<Utc>,
}

/// In-Memory Session-Store mit TTL
///
/// Abgelaufene Eintraege werden beim naechsten Anlegen einer Session entfernt.
#[derive(Debug)]
pub struct SpeicherSessionStore {
    /// session_id -> Eintrag
    sessions: RwLock<HashMap<String, SessionEintrag>>,
    ttl: Duration,
}

impl Default for SpeicherSessionStore {
    fn default() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(SESSION_TTL_SEKUNDEN),
        }
    }
}

impl SpeicherSessionStore {
    pub fn neu() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn mit_ttl(ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        })
    }

    /// Entfernt abgelaufene Sessions und gibt deren Anzahl zurueck
    pub async fn aufraeumen(&self) -> usize {
        let grenze = Utc::now() - self.ttl;
        let mut sessions = self.sessions.write().await;
        let vorher = sessions.len();
        sessions.retain(|_, s| s.erstellt_am > grenze);
        vorher - sessions.len()
    }

    /// Anzahl der gespeicherten Sessions (inkl. abgelaufener)
    pub async fn anzahl(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for SpeicherSessionStore {
    async fn anmelden(&self, user: &str) -> String {
        let entfernt = self.aufraeumen().await;
        if entfernt > 0 {
            tracing::debug!(anzahl = entfernt, "Abgelaufene Sessions bereinigt");
        }

        let id = session_id_generieren();
        let eintrag = SessionEintrag {
            user: user.to_string(),
            logged_in: true,
            erstellt_am: Utc::now(),
        };
        self.sessions.write().await.insert(id.clone(), eintrag);
        tracing::debug!(user = %user, "Neue Session erstellt");
        id
    }

    async fn ist_angemeldet(&self, session_id: &str) -> bool {
        let grenze = Utc::now() - self.ttl;
        self.sessions
            .read()
            .await
            .get(session_id)
            .is_some_and(|s| s.logged_in && s.erstellt_am > grenze)
    }

    async fn abmelden(&self, session_id: &str) {
        if let Some(eintrag) = self.sessions.write().await.remove(session_id) {
            tracing::debug!(user = %eintrag.user, "Session beendet");
        }
    }
}

/// Generiert eine kryptografisch sichere Session-ID (URL-sicheres Base64)
fn session_id_generieren() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn session_anlegen_und_pruefen() {
        let store = SpeicherSessionStore::neu();
        let id = store.anmelden("alice").await;

        assert!(!id.is_empty());
        assert!(store.ist_angemeldet(&id).await);
    }

    #[tokio::test]
    async fn unbekannte_session_ist_nicht_angemeldet() {
        let store = SpeicherSessionStore::neu();
        assert!(!store.ist_angemeldet("keine_gueltige_id").await);
    }

    #[tokio::test]
    async fn abmelden_loescht_flag() {
        let store = SpeicherSessionStore::neu();
        let id = store.anmelden("alice").await;

        store.abmelden(&id).await;
        assert!(!store.ist_angemeldet(&id).await);
        assert_eq!(store.anzahl().await, 0);
    }

    #[tokio::test]
    async fn session_ids_sind_eindeutig() {
        let store = SpeicherSessionStore::neu();
        let a = store.anmelden("alice").await;
        let b = store.anmelden("alice").await;
        assert_ne!(a, b, "Session-IDs muessen eindeutig sein");
    }

    #[tokio::test]
    async fn abgelaufene_sessions_werden_entfernt() {
        let store = SpeicherSessionStore::mit_ttl(Duration::zero());
        let id = store.anmelden("alice").await;

        assert!(!store.ist_angemeldet(&id).await);
        assert_eq!(store.aufraeumen().await, 1);
        assert_eq!(store.anzahl().await, 0);
    }
}
