//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::planner::PlannerError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("no snapshot stored for warehouse {0}")]
    WarehouseNotFound(i64),
    #[error(transparent)]
    Planner(#[from] PlannerError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::WarehouseNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Planner(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
