//! REST API routes.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::{paths, request_id, warehouses};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/v1/warehouses", get(warehouses::list_snapshots))
        .route(
            "/v1/warehouses/:warehouse_id/snapshot",
            get(warehouses::get_snapshot)
                .put(warehouses::put_snapshot)
                .delete(warehouses::delete_snapshot),
        )
        .route("/v1/warehouses/:warehouse_id/paths", post(paths::plan_path))
        .route(
            "/v1/warehouses/:warehouse_id/pallets/:pallet_id/path",
            post(paths::plan_pallet_path),
        )
        .layer(middleware::from_fn(request_id::ensure_request_id))
}
