//! Cross-origin allow-list.
//!
//! Requests without an `Origin` header pass through. Requests from an
//! origin outside the list are answered with 403 before any handler runs.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::ConfigError;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Arc<Vec<HeaderValue>>,
}

impl AllowedOrigins {
    pub fn new(origins: &[String]) -> Result<Self, ConfigError> {
        let origins = origins
            .iter()
            .map(|o| HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            origins: Arc::new(origins),
        })
    }

    pub fn allows(&self, origin: &HeaderValue) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
    }

    /// CORS headers for allowed callers, including preflight answers
    pub fn cors_layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    }
}

/// Middleware rejecting requests from origins outside the allow-list
pub async fn enforce_origin(
    State(allowed): State<AllowedOrigins>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(header::ORIGIN) {
        if !allowed.allows(origin) {
            let origin = origin.to_str().unwrap_or("<non-ascii>").to_string();
            tracing::warn!(origin = %origin, "Rejected request from disallowed origin");
            return AppError::ForbiddenOrigin(origin).into_response();
        }
    }

    next.run(request).await
}
