use api_types::ErrorBody;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use engine::EngineError;

pub use credentials::{CredentialVerifier, StaticCredentials};
pub use server::{ServerState, router, run_with_listener};

mod credentials;
mod server;
mod transactions;

/// `WWW-Authenticate` challenge sent along with every 401.
pub const CHALLENGE: &str = "Basic realm=\"Transaction API\"";

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    InvalidId,
    InvalidJson,
    EndpointNotFound,
    Unauthorized,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::MissingFields(_) | EngineError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        EngineError::IdsExhausted => StatusCode::INSUFFICIENT_STORAGE,
    }
}

fn error_body(status: StatusCode, error: String, message: Option<String>) -> Json<ErrorBody> {
    Json(ErrorBody {
        error,
        message,
        status_code: status.as_u16(),
    })
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::InvalidId => (
                StatusCode::BAD_REQUEST,
                "Invalid transaction ID format".to_string(),
            ),
            ServerError::InvalidJson => (StatusCode::BAD_REQUEST, "Invalid JSON data".to_string()),
            ServerError::EndpointNotFound => {
                (StatusCode::NOT_FOUND, "Endpoint not found".to_string())
            }
            ServerError::Unauthorized => {
                let status = StatusCode::UNAUTHORIZED;
                return (
                    status,
                    [(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE))],
                    error_body(
                        status,
                        "Unauthorized".to_string(),
                        Some("Authentication required".to_string()),
                    ),
                )
                    .into_response();
            }
        };

        (status, error_body(status, error, None)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
