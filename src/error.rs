// Error handling for the adapter
// The adapter performs no recovery: backend failures propagate to the caller
// unmodified, rendered as HTTP errors by the ResponseError impl.

use actix_web::HttpResponse;

/// Error type for adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("registry request failed: {0}")]
    Backend(#[from] reqwest::Error),

    #[error("registry returned status {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AdapterError>;

impl actix_web::error::ResponseError for AdapterError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AdapterError::Backend(_) | AdapterError::BackendStatus { .. } => {
                HttpResponse::BadGateway().body(self.to_string())
            }
            AdapterError::Config(message) => {
                HttpResponse::InternalServerError().body(message.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::error::ResponseError;

    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdapterError::BackendStatus {
            status: 503,
            body: "server is DOWN now".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "registry returned status 503: server is DOWN now"
        );

        let err = AdapterError::Config("nacos.server-addr missing".to_string());
        assert_eq!(
            err.to_string(),
            "configuration error: nacos.server-addr missing"
        );
    }

    #[test]
    fn test_backend_status_maps_to_bad_gateway() {
        let err = AdapterError::BackendStatus {
            status: 500,
            body: String::new(),
        };
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_config_error_maps_to_internal_error() {
        let err = AdapterError::Config("bad".to_string());
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
