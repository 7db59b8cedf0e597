//! Passwort-Hashing mit Argon2id
//!
//! Der Salt wird bei jedem Aufruf neu erzeugt und steckt zusammen mit
//! Algorithmus und Parametern im PHC-String. Zur Verifikation wird daher
//! kein separat gespeicherter Salt benoetigt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Kostenparameter fuer Argon2id
///
/// Standardwerte gemaess OWASP-Empfehlungen:
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Parameter {
    pub speicher_kib: u32,
    pub iterationen: u32,
    pub parallelitaet: u32,
}

impl Default for Argon2Parameter {
    fn default() -> Self {
        Self {
            speicher_kib: 64 * 1024,
            iterationen: 3,
            parallelitaet: 1,
        }
    }
}

/// Hasht und verifiziert Passwoerter
#[derive(Debug, Clone)]
pub struct PasswortHasher {
    params: Params,
}

impl PasswortHasher {
    /// Erstellt einen Hasher; ungueltige Parameter werden sofort abgelehnt
    pub fn neu(parameter: &Argon2Parameter) -> AuthResult<Self> {
        let params = Params::new(
            parameter.speicher_kib,
            parameter.iterationen,
            parameter.parallelitaet,
            None,
        )
        .map_err(|e| AuthError::Konfiguration(format!("Argon2-Parameter ungueltig: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hasht ein Passwort mit einem frischen, zufaelligen Salt
    ///
    /// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
    pub fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))
    }

    /// Prueft ein Passwort gegen einen gespeicherten PHC-Hash
    ///
    /// Liefert `false` bei falschem Passwort und bei kaputtem Hash. Die
    /// Parameter werden aus dem Hash gelesen, nicht aus `self`.
    pub fn verifizieren(&self, passwort: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(e) => {
                tracing::debug!(fehler = %e, "Gespeicherter Passwort-Hash nicht lesbar");
                return false;
            }
        };

        self.argon2()
            .verify_password(passwort.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
pub(crate) fn test_hasher() -> PasswortHasher {
    // Minimalkosten, damit die Tests schnell bleiben
    PasswortHasher::neu(&Argon2Parameter {
        speicher_kib: 8,
        iterationen: 1,
        parallelitaet: 1,
    })
    .expect("Test-Parameter ungueltig")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passwort_hashen_und_verifizieren() {
        let hasher = test_hasher();
        let passwort = "sicheres_passwort_123!";
        let hash = hasher.hashen(passwort).expect("Hashing fehlgeschlagen");

        assert!(!hash.is_empty());
        assert!(
            hash.starts_with("$argon2id$"),
            "Hash muss mit $argon2id$ beginnen"
        );
        assert!(hasher.verifizieren(passwort, &hash), "Passwort muss korrekt verifiziert werden");
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hasher = test_hasher();
        let hash = hasher.hashen("richtiges_passwort").unwrap();

        assert!(!hasher.verifizieren("falsches_passwort", &hash));
        assert!(!hasher.verifizieren("", &hash));
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let hasher = test_hasher();
        let hash1 = hasher.hashen("gleiches_passwort").unwrap();
        let hash2 = hasher.hashen("gleiches_passwort").unwrap();

        assert_ne!(
            hash1, hash2,
            "Gleiche Passwoerter muessen verschiedene Hashes erzeugen (Salt)"
        );
    }

    #[test]
    fn kaputter_hash_gibt_false() {
        let hasher = test_hasher();
        assert!(!hasher.verifizieren("passwort", "kein_gueltiger_hash"));
        assert!(!hasher.verifizieren("passwort", ""));
        assert!(!hasher.verifizieren("passwort", "$argon2id$v=19$m=8,t=1,p=1$abc"));
    }

    #[test]
    fn hash_mit_anderen_parametern_bleibt_pruefbar() {
        let alt = test_hasher();
        let hash = alt.hashen("pw1").unwrap();

        let neu = PasswortHasher::neu(&Argon2Parameter {
            speicher_kib: 16,
            iterationen: 2,
            parallelitaet: 1,
        })
        .unwrap();
        assert!(neu.verifizieren("pw1", &hash));
    }

    #[test]
    fn ungueltige_parameter_werden_abgelehnt() {
        let ergebnis = PasswortHasher::neu(&Argon2Parameter {
            speicher_kib: 1,
            iterationen: 0,
            parallelitaet: 0,
        });
        assert!(matches!(ergebnis, Err(AuthError::Konfiguration(_))));
    }

    #[test]
    fn standard_parameter_entsprechen_owasp() {
        let p = Argon2Parameter::default();
        assert_eq!(p.speicher_kib, 65536);
        assert_eq!(p.iterationen, 3);
        assert_eq!(p.parallelitaet, 1);
        assert!(PasswortHasher::neu(&p).is_ok());
    }
}
