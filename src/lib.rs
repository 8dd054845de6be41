pub mod cli;
pub mod config;
pub mod delivery;
pub mod observability;
pub mod routes;
pub mod session;
pub mod template;

pub use config::Config;
pub use routes::AppState;

use std::sync::Arc;

use mclears_inquiry::Deliver;

/// Create app router for testing
///
/// Builds the same router `serve` uses, around the given delivery, without
/// binding a listener.
pub fn create_app(config: Config, delivery: Arc<dyn Deliver>) -> axum::Router {
    let sessions = session::Sessions::new(
        delivery,
        config.delivery.timeout(),
        config.session.ttl(),
        config.session.max_entries,
    );

    routes::router(AppState { config, sessions })
}
