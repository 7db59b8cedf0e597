//! pforte-auth – Authentifizierung fuer Pforte
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Signierte, kurzlebige Tokens (HS256) mit gleitendem Ablauf
//! - Server-seitige Sessions (nur das `logged_in`-Flag)
//! - AuthService (Registrierung und Login)

pub mod error;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult, TokenFehler};
pub use password::{Argon2Parameter, PasswortHasher};
pub use service::{Anmeldung, AuthService};
pub use session::{SessionStore, SpeicherSessionStore};
pub use token::{TokenClaims, TokenDienst, STANDARD_LEBENSDAUER_SEK};
