use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use filmrental_auth::{LoginRequest, RefreshRequest, TokenResponse};

use crate::app::errors::ApiError;
use crate::app::services::AppServices;

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = body.map_err(|rej| ApiError::validation(rej.body_text()))?;
    let tokens = services.sessions.login(&req).await?;
    Ok(Json(tokens))
}

pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(req) = body.map_err(|rej| ApiError::validation(rej.body_text()))?;
    let tokens = services.sessions.refresh(&req).await?;
    Ok(Json(tokens))
}
