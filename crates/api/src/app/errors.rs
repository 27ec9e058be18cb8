use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use filmrental_auth::{AuthzError, GateError, HashError, SessionError, StoreError, TokenError};

use crate::app::catalog::CatalogError;

/// Every failure a handler or middleware can surface, mapped to a stable
/// status code and JSON body in [`IntoResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Authz(#[from] AuthzError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Gate(err) => error_only(StatusCode::UNAUTHORIZED, err.to_string()),
            Self::Authz(err) => authz_error_to_response(err),
            Self::Session(err) => session_error_to_response(err),
            Self::Store(err) => store_error_to_response(err),
            Self::Hash(err) => internal(err),
            Self::Catalog(err) => internal(err),
            Self::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation failed", msg),
            Self::NotFound(what) => json_error(StatusCode::NOT_FOUND, "not found", format!("{what} not found")),
        }
    }
}

fn authz_error_to_response(err: AuthzError) -> Response {
    match err {
        AuthzError::InsufficientPermissions {
            ref required_permission,
            ref user_role,
        } => (
            StatusCode::FORBIDDEN,
            axum::Json(json!({
                "error": "Insufficient permissions",
                "message": format!("this action requires the '{required_permission}' permission"),
                "required_permission": required_permission.as_str(),
                "user_role": user_role.as_str(),
            })),
        )
            .into_response(),
        AuthzError::PayloadMissing | AuthzError::InvalidPayload => {
            tracing::error!(error = %err, "permission check ran without a usable payload");
            error_only(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

fn session_error_to_response(err: SessionError) -> Response {
    match err {
        SessionError::ValidationFailed(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation failed", msg)
        }
        SessionError::AuthenticationFailed => {
            error_only(StatusCode::UNAUTHORIZED, err.to_string())
        }
        SessionError::Token(err) => token_error_to_response(err),
        SessionError::Store(err) => store_error_to_response(err),
        SessionError::Hashing(err) => internal(err),
    }
}

fn token_error_to_response(err: TokenError) -> Response {
    match err {
        TokenError::InvalidToken | TokenError::ExpiredToken => {
            error_only(StatusCode::UNAUTHORIZED, err.to_string())
        }
        TokenError::InvalidKeySize { .. }
        | TokenError::InvalidSubject
        | TokenError::SigningFailure(_) => internal(err),
    }
}

fn store_error_to_response(err: StoreError) -> Response {
    match err {
        StoreError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
        StoreError::Backend(_) => internal(err),
    }
}

fn internal(err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "internal error while handling request");
    error_only(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
}

/// `{"error": <reason>}`, used where the reason alone is the whole story.
pub fn error_only(status: StatusCode, reason: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "error": reason.into() }))).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
