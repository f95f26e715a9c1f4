use crate::error::ErrorKind;
use crate::models::{HealthResponse, IdResponse, PointsResponse, Receipt};
use crate::service::PointService;
use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub type SharedService = Arc<dyn PointService>;

/// 健康检查
pub async fn health_check(State(service): State<SharedService>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        receipts: service.receipt_count(),
    })
}

/// 处理小票: 返回ID
pub async fn process_receipt(
    State(service): State<SharedService>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Response {
    let receipt = match payload {
        Ok(Json(receipt)) => receipt,
        Err(rejection) => {
            tracing::warn!("Malformed receipt body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                format!("invalid receipt JSON: {}", rejection.body_text()),
            )
                .into_response();
        }
    };

    match service.process_receipt(&receipt) {
        Ok(id) => (StatusCode::OK, Json(IdResponse { id })).into_response(),
        Err(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(e) => {
            tracing::error!("Failed to process receipt: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

/// 查询积分
pub async fn get_points(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Response {
    match service.get_points(&id) {
        Ok(points) => (StatusCode::OK, Json(PointsResponse { points })).into_response(),
        Err(e) => match e.kind() {
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
            ErrorKind::Internal => {
                tracing::error!("Failed to look up points for {}: {}", id, e);
                (StatusCode::BAD_REQUEST, "unable to look up points").into_response()
            }
            ErrorKind::Validation | ErrorKind::Scoring => {
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
        },
    }
}
