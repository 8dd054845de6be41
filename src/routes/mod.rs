use axum::{
    Router,
    routing::{get, post},
};

use crate::{config::Config, session::Sessions};

pub mod contact;
mod health;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: Sessions,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/contact", get(contact::page).post(contact::action))
        .route("/contact/field", post(contact::field))
        .route("/contact/reset", post(contact::reset))
        .route("/contact/status", get(contact::status))
        .with_state(app_state)
}
