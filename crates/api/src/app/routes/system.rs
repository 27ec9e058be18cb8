use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, Json};

use filmrental_auth::RoleDefinition;

use crate::app::dto::WhoAmIResponse;
use crate::app::services::AppServices;
use crate::context::CurrentUser;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    CurrentUser(payload): CurrentUser,
) -> Json<WhoAmIResponse> {
    let permissions = services
        .permissions
        .table()
        .permissions_for(payload.role.as_str());

    Json(WhoAmIResponse {
        username: payload.subject,
        role: payload.role,
        permissions,
    })
}

pub async fn roles(Extension(services): Extension<Arc<AppServices>>) -> Json<Vec<RoleDefinition>> {
    Json(services.permissions.table().definitions())
}
