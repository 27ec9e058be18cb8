use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use filmrental_auth::{AuthGate, GateError};

use crate::app::errors::ApiError;

#[derive(Clone)]
pub struct AuthState {
    pub gate: AuthGate,
}

/// Authenticates the request and attaches the verified
/// [`TokenPayload`](filmrental_auth::TokenPayload) to its extensions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = match req.headers().get(AUTHORIZATION) {
        None => None,
        Some(value) => match value.to_str() {
            Ok(value) => Some(value),
            Err(_) => return ApiError::from(GateError::MalformedHeader).into_response(),
        },
    };

    let payload = match state.gate.authenticate(header) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!(error = %err, path = %req.uri().path(), "request rejected by auth gate");
            return ApiError::from(err).into_response();
        }
    };

    req.extensions_mut().insert(payload);
    next.run(req).await
}
