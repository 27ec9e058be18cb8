use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    Json,
};

use filmrental_auth::{validate_credentials, CredentialRecord, Role};

use crate::app::dto::{CreateStaffRequest, StaffResponse};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

pub async fn list_staff(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<StaffResponse>>, ApiError> {
    let staff = services.store.list().await?;
    Ok(Json(staff.into_iter().map(StaffResponse::from).collect()))
}

pub async fn create_staff(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(actor): CurrentUser,
    body: Result<Json<CreateStaffRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StaffResponse>), ApiError> {
    let Json(req) = body.map_err(|rej| ApiError::validation(rej.body_text()))?;

    validate_credentials(&req.username, &req.password)?;
    let role = Role::new(req.role.trim().to_lowercase());
    if !services.permissions.table().is_valid_role(role.as_str()) {
        return Err(ApiError::validation(format!("unknown role '{}'", req.role)));
    }

    let record = CredentialRecord {
        username: req.username,
        password_hash: services.hasher.hash(&req.password)?,
        role,
    };
    let response = StaffResponse {
        username: record.username.clone(),
        role: record.role.clone(),
    };
    services.store.create(record).await?;

    tracing::info!(
        created_by = %actor.subject,
        username = %response.username,
        role = %response.role,
        "staff account created"
    );
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn delete_staff(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(actor): CurrentUser,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !services.store.delete(&username).await? {
        return Err(ApiError::not_found(format!("staff '{username}'")));
    }

    tracing::info!(deleted_by = %actor.subject, %username, "staff account deleted");
    Ok(StatusCode::NO_CONTENT)
}
