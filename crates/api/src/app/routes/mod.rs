use axum::Router;

pub mod action_figures;
pub mod system;

/// Router for all listing endpoints.
pub fn router() -> Router {
    Router::new().merge(action_figures::router())
}
