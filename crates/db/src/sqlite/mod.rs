//! SQLite-Backend-Implementierung des UserRepository

pub mod users;
pub mod verbindung;

pub use verbindung::SqliteDb;
