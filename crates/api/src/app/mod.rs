//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: credential store, hasher, gates and session issuer
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware::{self, AuthState};

use self::services::AppServices;

pub mod catalog;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<AppServices>) -> Router {
    let auth_state = AuthState {
        gate: services.auth.clone(),
    };

    // Protected routes: bearer token required, permissions checked per route.
    let protected = routes::protected(&services.permissions).layer(from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    protected
        .merge(routes::public())
        .layer(ServiceBuilder::new().layer(Extension(services)))
}
