//! HTTP API for snapshot upload and path planning.

pub mod error;
pub mod paths;
pub mod request_id;
mod routes;
pub mod warehouses;

use axum::Router;

pub use error::ApiError;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
