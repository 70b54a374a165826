use crate::api::ApiError;
use crate::config::ConfigError;
use crate::portal::PortalError;
use crate::telemetry::TelemetryError;
use crate::workflows::payroll::ExportError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Api(ApiError),
    Portal(PortalError),
    Export(ExportError),
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Api(err) => write!(f, "{}", err),
            AppError::Portal(err) => write!(f, "{}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
            AppError::InvalidRequest(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Api(err) => Some(err),
            AppError::Portal(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::InvalidRequest(_) => None,
        }
    }
}

/// Status for a backend failure relayed to our own caller. Refusals keep the
/// backend's 4xx; anything the backend could not answer is a bad gateway.
fn api_status(err: &ApiError) -> StatusCode {
    match err {
        ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
        ApiError::Rejected { status, .. } => match status.map(StatusCode::from_u16) {
            None => StatusCode::UNPROCESSABLE_ENTITY,
            Some(Ok(code)) if code.is_client_error() => code,
            Some(_) => StatusCode::BAD_GATEWAY,
        },
        ApiError::Transport(_) | ApiError::Decode { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Portal(PortalError::Gate(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Portal(PortalError::InFlight { .. }) => StatusCode::CONFLICT,
            AppError::Api(err) | AppError::Portal(PortalError::Api(err)) => api_status(err),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Portal(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ApiError> for AppError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<PortalError> for AppError {
    fn from(value: PortalError) -> Self {
        Self::Portal(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn backend_refusals_keep_their_status() {
        let forbidden = || ApiError::Forbidden {
            message: Some("This action is unauthorized.".to_string()),
        };
        assert_eq!(status_of(AppError::Api(forbidden())), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(AppError::Portal(PortalError::Api(forbidden()))),
            StatusCode::FORBIDDEN
        );

        let rejected = |status| ApiError::Rejected {
            status,
            message: "Claim was already processed".to_string(),
        };
        assert_eq!(status_of(AppError::Api(rejected(Some(409)))), StatusCode::CONFLICT);
        assert_eq!(
            status_of(AppError::Portal(PortalError::Api(rejected(None)))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_of(AppError::Api(rejected(Some(503)))), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_of(AppError::Api(ApiError::Unauthorized)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn unreadable_backend_replies_are_a_bad_gateway() {
        let err = AppError::Portal(PortalError::Api(ApiError::Decode {
            endpoint: "/payroll/periods".to_string(),
            detail: "missing field `id`".to_string(),
        }));
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_of(AppError::InvalidRequest("bad tab".to_string())),
            StatusCode::BAD_REQUEST
        );
    }
}
