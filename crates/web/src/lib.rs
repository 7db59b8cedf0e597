//! pforte-web – HTTP-Oberflaeche fuer Pforte
//!
//! Oeffentliche Seiten (Landing, Login, Signup), die Formular-Endpunkte und
//! die geschuetzte Anwendungsseite `/app`. Geschuetzte Routen laufen durch
//! das [`gate::auth_gate`], das Tokens prueft und bei jedem erfolgreichen
//! Durchlauf ein frisches Token als Cookie anhaengt.

pub mod cookies;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod routes;
pub mod seiten;
pub mod server;
pub mod state;

pub use cookies::CookieKonfig;
pub use error::{WebError, WebResult};
pub use gate::AuthBenutzer;
pub use routes::app_router;
pub use server::{anwendung, WebServer, WebServerKonfig};
pub use state::AppState;
