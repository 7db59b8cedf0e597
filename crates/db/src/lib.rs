//! pforte-db – Credential-Store
//!
//! Dieses Crate kapselt die Benutzertabelle hinter dem [`UserRepository`]-Trait.
//! Die SQLite-Implementierung oeffnet fuer jede Operation eine eigene,
//! kurzlebige Verbindung und schliesst sie danach wieder (kein Pool).

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use models::{BenutzerRecord, NeuerBenutzer};
pub use repository::{DatabaseConfig, DbResult, UserRepository};
pub use sqlite::SqliteDb;
