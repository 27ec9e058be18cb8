use axum::{extract::FromRequestParts, http::request::Parts};

use filmrental_auth::{AuthzError, TokenPayload};

use crate::app::errors::ApiError;

/// Authenticated identity for a request.
///
/// Only available behind [`auth_middleware`](crate::middleware::auth_middleware);
/// on an unprotected route the extractor fails with a 500, since that is a
/// routing mistake rather than a client error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub TokenPayload);

impl CurrentUser {
    pub fn payload(&self) -> &TokenPayload {
        &self.0
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TokenPayload>()
            .cloned()
            .map(CurrentUser)
            .ok_or(ApiError::Authz(AuthzError::PayloadMissing))
    }
}
