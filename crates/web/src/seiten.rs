//! HTML-Seiten
//!
//! Bewusst schlichte Vorlagen; Styles kommen aus `/static/style.css`.

fn layout(titel: &str, inhalt: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{titel} – Pforte</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
{inhalt}
  </main>
</body>
</html>
"#
    )
}

pub fn landing() -> String {
    layout(
        "Willkommen",
        r#"    <h1>Pforte</h1>
    <p>Bitte <a href="/login">anmelden</a> oder <a href="/signup">registrieren</a>.</p>"#,
    )
}

fn formular(titel: &str, ziel: &str, knopf: &str, fusszeile: &str) -> String {
    layout(
        titel,
        &format!(
            r#"    <h1>{titel}</h1>
    <form method="post" action="{ziel}">
      <label>Benutzername <input name="username" required autocomplete="username"></label>
      <label>Passwort <input name="password" type="password" required></label>
      <button type="submit">{knopf}</button>
    </form>
    <p>{fusszeile}</p>"#
        ),
    )
}

pub fn login() -> String {
    formular(
        "Anmelden",
        "/login",
        "Anmelden",
        r#"Noch kein Konto? <a href="/signup">Registrieren</a>"#,
    )
}

pub fn signup() -> String {
    formular(
        "Registrieren",
        "/signup",
        "Konto anlegen",
        r#"Schon registriert? <a href="/login">Anmelden</a>"#,
    )
}

pub fn app(username: &str) -> String {
    layout(
        "App",
        &format!(
            r#"    <h1>Hallo {}</h1>
    <p>Du bist angemeldet.</p>
    <form method="post" action="/app">
      <button type="submit">Abmelden</button>
    </form>"#,
            html_escape(username)
        ),
    )
}

/// Maskiert die fuer HTML-Text relevanten Zeichen
pub fn html_escape(text: &str) -> String {
    let mut aus = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => aus.push_str("&amp;"),
            '<' => aus.push_str("&lt;"),
            '>' => aus.push_str("&gt;"),
            '"' => aus.push_str("&quot;"),
            '\'' => aus.push_str("&#x27;"),
            c => aus.push(c),
        }
    }
    aus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benutzername_wird_maskiert() {
        let seite = app("<script>alert('x')</script>");
        assert!(!seite.contains("<script>"));
        assert!(seite.contains("&lt;script&gt;"));
    }

    #[test]
    fn formulare_zeigen_auf_ihre_endpunkte() {
        assert!(login().contains(r#"action="/login""#));
        assert!(signup().contains(r#"action="/signup""#));
        assert!(landing().contains(r#"href="/signup""#));
    }
}
