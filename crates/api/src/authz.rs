//! Per-route permission enforcement.
//!
//! Runs after [`auth_middleware`](crate::middleware::auth_middleware) and
//! consults the [`PermissionGate`] with whatever payload it left behind.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use filmrental_auth::{Permission, PermissionGate, TokenPayload};

use crate::app::errors::ApiError;

#[derive(Debug, Clone)]
pub struct RequiredPermission {
    pub gate: PermissionGate,
    pub permission: Permission,
}

pub async fn require_permission(
    State(required): State<RequiredPermission>,
    req: Request,
    next: Next,
) -> Response {
    let payload = req.extensions().get::<TokenPayload>();

    if let Err(err) = required.gate.check(payload, &required.permission) {
        match payload {
            Some(p) => tracing::warn!(
                subject = %p.subject,
                role = %p.role,
                permission = %required.permission,
                "permission denied"
            ),
            None => tracing::warn!(permission = %required.permission, "permission check without payload"),
        }
        return ApiError::from(err).into_response();
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::post,
        Router,
    };
    use chrono::Duration;
    use filmrental_auth::{AuthGate, PermissionTable, Role, TokenCodec, TokenType};
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::{auth_middleware, AuthState};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn probe(codec: Arc<TokenCodec>, permission: Permission, with_auth: bool) -> Router {
        let required = RequiredPermission {
            gate: PermissionGate::new(Arc::new(PermissionTable::with_defaults())),
            permission,
        };
        let router = Router::new()
            .route("/probe", post(|| async { "ok" }))
            .layer(from_fn_with_state(required, require_permission));
        if with_auth {
            router.layer(from_fn_with_state(
                AuthState {
                    gate: AuthGate::new(codec),
                },
                auth_middleware,
            ))
        } else {
            router
        }
    }

    fn bearer(codec: &TokenCodec, role: Role) -> String {
        let token = codec
            .mint("alice", &role, Duration::minutes(5), TokenType::Access)
            .unwrap();
        format!("Bearer {token}")
    }

    async fn call(router: Router, auth: Option<String>) -> (StatusCode, serde_json::Value) {
        let mut req = HttpRequest::post("/probe");
        if let Some(auth) = auth {
            req = req.header(AUTHORIZATION, auth);
        }
        let res = router.oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn admin_passes_film_create() {
        let codec = Arc::new(TokenCodec::new(SECRET).unwrap());
        let auth = bearer(&codec, Role::ADMIN);
        let (status, _) = call(probe(codec, Permission::FILM_CREATE, true), Some(auth)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn user_is_forbidden_from_film_create() {
        let codec = Arc::new(TokenCodec::new(SECRET).unwrap());
        let auth = bearer(&codec, Role::USER);
        let (status, body) = call(probe(codec, Permission::FILM_CREATE, true), Some(auth)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["required_permission"], "film:create");
        assert_eq!(body["user_role"], "user");
    }

    #[tokio::test]
    async fn user_can_read_films() {
        let codec = Arc::new(TokenCodec::new(SECRET).unwrap());
        let auth = bearer(&codec, Role::USER);
        let (status, _) = call(probe(codec, Permission::FILM_READ, true), Some(auth)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_header_stops_before_permission_check() {
        let codec = Arc::new(TokenCodec::new(SECRET).unwrap());
        let (status, body) = call(probe(codec, Permission::FILM_READ, true), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "authorization header is not provided");
    }

    #[tokio::test]
    async fn unwired_auth_is_internal_error() {
        let codec = Arc::new(TokenCodec::new(SECRET).unwrap());
        let (status, body) = call(probe(codec, Permission::FILM_READ, false), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "authorization payload not found");
    }
}
