//! Route-Definitionen

use std::path::Path;

use axum::{middleware, routing::get, Router};
use tower_http::services::ServeDir;

use crate::{gate, handlers, state::AppState};

/// Oeffentliche und geschuetzte Routen inkl. statischer Dateien
///
/// Nur `/app` laeuft durch das Auth-Gate.
pub fn app_router(state: AppState, statisch: &Path) -> Router {
    let geschuetzt = Router::new()
        .route(
            "/app",
            get(handlers::app::get_app).post(handlers::app::post_app),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            gate::auth_gate,
        ));

    Router::new()
        .route("/", get(handlers::seiten::get_index))
        .route(
            "/login",
            get(handlers::seiten::get_login).post(handlers::konto::post_login),
        )
        .route(
            "/signup",
            get(handlers::seiten::get_signup).post(handlers::konto::post_signup),
        )
        .merge(geschuetzt)
        .nest_service("/static", ServeDir::new(statisch))
        .with_state(state)
}
