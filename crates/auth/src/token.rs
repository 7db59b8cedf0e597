//! Signierte, kurzlebige Anmelde-Tokens
//!
//! Ein Token traegt `{user, expiration, jti}` und wird mit HMAC-SHA256 (HS256)
//! unter dem Server-Geheimnis signiert. Es wird nirgends gespeichert: gueltig
//! ist es genau dann, wenn die Signatur stimmt und `expiration` noch in der
//! Zukunft liegt. Jede erfolgreiche Pruefung am Auth-Gate stellt ein neues
//! Token aus (gleitender Ablauf); alte Tokens werden nicht widerrufen.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult, TokenFehler};

/// Standard-Lebensdauer eines Tokens: 120 Sekunden
pub const STANDARD_LEBENSDAUER_SEK: i64 = 120;

/// Nutzlast eines Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Benutzername
    pub user: String,
    /// Ablaufzeitpunkt als Unix-Zeitstempel (Sekunden)
    pub expiration: i64,
    /// Zufaellige ID, damit zwei Tokens derselben Sekunde verschieden sind
    pub jti: String,
}

impl TokenClaims {
    pub fn laeuft_ab_am(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expiration, 0)
    }
}

/// Stellt Tokens aus und prueft sie
///
/// Das Geheimnis wird bei der Konstruktion uebergeben und danach nur gelesen.
#[derive(Clone)]
pub struct TokenDienst {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lebensdauer: Duration,
}

impl std::fmt::Debug for TokenDienst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDienst")
            .field("lebensdauer", &self.lebensdauer)
            .finish_non_exhaustive()
    }
}

impl TokenDienst {
    /// Erstellt den Dienst mit Geheimnis und Lebensdauer in Sekunden
    pub fn neu(geheimnis: &[u8], lebensdauer_sek: i64) -> AuthResult<Self> {
        if geheimnis.is_empty() {
            return Err(AuthError::Konfiguration(
                "Signatur-Geheimnis darf nicht leer sein".into(),
            ));
        }
        if lebensdauer_sek <= 0 {
            return Err(AuthError::Konfiguration(format!(
                "Token-Lebensdauer muss positiv sein (war {lebensdauer_sek})"
            )));
        }

        // Ablauf wird separat geprueft, damit "abgelaufen" von "ungueltig"
        // unterscheidbar bleibt
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding: EncodingKey::from_secret(geheimnis),
            decoding: DecodingKey::from_secret(geheimnis),
            validation,
            lebensdauer: Duration::seconds(lebensdauer_sek),
        })
    }

    pub fn lebensdauer(&self) -> Duration {
        self.lebensdauer
    }

    /// Stellt ein Token fuer `user` aus, gueltig ab jetzt
    pub fn ausstellen(&self, user: &str) -> AuthResult<String> {
        self.ausstellen_zum(user, Utc::now())
    }

    /// Stellt ein Token aus, dessen Ablauf relativ zu `jetzt` berechnet wird
    pub fn ausstellen_zum(&self, user: &str, jetzt: DateTime<Utc>) -> AuthResult<String> {
        let claims = TokenClaims {
            user: user.to_string(),
            expiration: (jetzt + self.lebensdauer).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::intern(format!("Token-Signierung fehlgeschlagen: {e}")))
    }

    /// Prueft ein Token gegen die aktuelle Zeit
    pub fn validieren(&self, token: &str) -> Result<TokenClaims, TokenFehler> {
        self.validieren_zum(token, Utc::now())
    }

    /// Prueft erst die Signatur, dann den Ablauf gegen `jetzt`
    ///
    /// Jeder Dekodierfehler (Format, Algorithmus, Manipulation) wird zu
    /// `TokenFehler::Ungueltig`; es gibt keinen Panic-Pfad.
    pub fn validieren_zum(
        &self,
        token: &str,
        jetzt: DateTime<Utc>,
    ) -> Result<TokenClaims, TokenFehler> {
        let claims = decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|daten| daten.claims)
            .map_err(|e| TokenFehler::Ungueltig(e.to_string()))?;

        if jetzt.timestamp() >= claims.expiration {
            return Err(TokenFehler::Abgelaufen { user: claims.user });
        }

        Ok(claims)
    }
}
