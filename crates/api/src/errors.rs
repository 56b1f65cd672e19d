use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use switchyard_domain::DomainError;

#[derive(Debug)]
pub enum ProxyError {
    Domain(DomainError),
    /// The inbound body could not be read. The reason is logged, never sent.
    Body(String),
}

impl From<DomainError> for ProxyError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Body(_) => StatusCode::BAD_REQUEST,
            ProxyError::Domain(err) => match err {
                DomainError::MissingHost | DomainError::InvalidHost(_) => StatusCode::BAD_REQUEST,
                DomainError::UnknownDomain(_) | DomainError::RegistryTimeout(_) => {
                    StatusCode::NOT_FOUND
                }
                DomainError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                DomainError::BackendTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                DomainError::PoolExhausted => StatusCode::SERVICE_UNAVAILABLE,
                DomainError::BackendUnavailable { .. }
                | DomainError::RegistryUnavailable(_)
                | DomainError::DatabaseError(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ProxyError::Body(_) => "invalid request body".to_string(),
            ProxyError::Domain(err) => match err {
                DomainError::MissingHost
                | DomainError::InvalidHost(_)
                | DomainError::PayloadTooLarge { .. } => err.to_string(),
                DomainError::UnknownDomain(_) | DomainError::RegistryTimeout(_) => {
                    "no route for host".to_string()
                }
                DomainError::BackendTimeout { .. } => "backend timed out".to_string(),
                DomainError::PoolExhausted => "proxy at capacity".to_string(),
                DomainError::BackendUnavailable { .. }
                | DomainError::RegistryUnavailable(_)
                | DomainError::DatabaseError(_) => "bad gateway".to_string(),
                _ => "internal error".to_string(),
            },
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProxyError::Domain(err) => err.fmt(f),
            ProxyError::Body(reason) => write!(f, "invalid request body: {reason}"),
        }
    }
}
