use crate::errors::service::ServiceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadGateway(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::BadGateway(format!("Backend returned invalid data: {errors:?}"))
            }
            ServiceError::Transport(msg) => {
                HttpError::BadGateway(format!("Backend unreachable: {msg}"))
            }
            ServiceError::UnexpectedStatus { status, url } => {
                HttpError::BadGateway(format!("Backend answered {status} for {url}"))
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, msg).into_response()
    }
}
