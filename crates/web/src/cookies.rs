//! Cookie-Hilfen: Lesen aus dem Request, Bauen von `Set-Cookie`-Werten

use axum::http::{header, HeaderMap, HeaderValue};

/// Namen und Attribute der von Pforte gesetzten Cookies
#[derive(Debug, Clone)]
pub struct CookieKonfig {
    /// Traegt das signierte Token
    pub auth_name: String,
    /// Traegt die Session-ID fuer das `logged_in`-Flag
    pub session_name: String,
    /// Setzt das `Secure`-Attribut (nur ueber HTTPS)
    pub secure: bool,
    /// Max-Age des Token-Cookies in Sekunden
    pub token_max_age_sek: i64,
}

impl Default for CookieKonfig {
    fn default() -> Self {
        Self {
            auth_name: "auth_token".into(),
            session_name: "session".into(),
            secure: false,
            token_max_age_sek: pforte_auth::STANDARD_LEBENSDAUER_SEK,
        }
    }
}

impl CookieKonfig {
    /// `Set-Cookie` fuer ein frisch ausgestelltes Token
    pub fn token_setzen(&self, token: &str) -> String {
        set_cookie(&self.auth_name, token, Some(self.token_max_age_sek), self.secure)
    }

    /// `Set-Cookie` das das Token-Cookie im Browser loescht
    pub fn token_loeschen(&self) -> String {
        set_cookie(&self.auth_name, "", Some(0), self.secure)
    }

    /// `Set-Cookie` fuer die Session-ID (Browser-Session, kein Max-Age)
    pub fn session_setzen(&self, session_id: &str) -> String {
        set_cookie(&self.session_name, session_id, None, self.secure)
    }

    pub fn session_loeschen(&self) -> String {
        set_cookie(&self.session_name, "", Some(0), self.secure)
    }
}

/// Baut einen `Set-Cookie`-Wert mit HttpOnly und SameSite=Lax
pub fn set_cookie(name: &str, wert: &str, max_age_sek: Option<i64>, secure: bool) -> String {
    let mut cookie = format!("{name}={wert}; Path=/; HttpOnly; SameSite=Lax");
    if let Some(max_age) = max_age_sek {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Haengt einen `Set-Cookie`-Header an; ungueltige Werte werden verworfen
pub fn anhaengen(headers: &mut HeaderMap, set_cookie: &str) {
    match HeaderValue::from_str(set_cookie) {
        Ok(wert) => {
            headers.append(header::SET_COOKIE, wert);
        }
        Err(e) => tracing::warn!(fehler = %e, "Set-Cookie-Wert ist kein gueltiger Header"),
    }
}

/// Liest den Wert eines Cookies aus allen `Cookie`-Headern
pub fn cookie_wert(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|zeile| zeile.split(';'))
        .filter_map(|teil| cookie::Cookie::parse(teil.trim()).ok())
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

/// Extrahiert Bearer-Token aus dem Authorization-Header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
