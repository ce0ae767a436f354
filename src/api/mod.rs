pub mod contact;
pub mod health;
pub mod origin;

use axum::{middleware, Router};

use crate::config::ConfigError;
use crate::state::AppState;

use origin::AllowedOrigins;

/// Create the router with all routes and the origin policy applied
pub fn create_router(state: AppState) -> Result<Router, ConfigError> {
    let allowed = AllowedOrigins::new(&state.config.allowed_origins)?;

    Ok(Router::new()
        .merge(health::health_routes())
        .merge(contact::contact_routes())
        .with_state(state)
        .layer(allowed.cors_layer())
        .layer(middleware::from_fn_with_state(
            allowed,
            origin::enforce_origin,
        )))
}
