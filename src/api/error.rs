use crate::error::EngineError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 传输层错误: 请求体解析失败或结构性校验失败, 不含业务拒绝
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", .0.body_text())]
    Payload(#[from] JsonRejection),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Payload(rejection) => rejection.status(),
            ApiError::Engine(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        tracing::debug!("request rejected with {}: {}", status, self);

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
