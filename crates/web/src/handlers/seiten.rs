//! Oeffentliche HTML-Seiten

use axum::response::Html;

use crate::seiten;

pub async fn get_index() -> Html<String> {
    Html(seiten::landing())
}

pub async fn get_login() -> Html<String> {
    Html(seiten::login())
}

pub async fn get_signup() -> Html<String> {
    Html(seiten::signup())
}
