use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};

use filmrental_auth::{Permission, PermissionGate};

use crate::authz::{require_permission, RequiredPermission};

pub mod auth;
pub mod films;
pub mod staff;
pub mod system;

/// Endpoints reachable without a token.
pub fn public() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/users/login", post(auth::login))
        .route("/users/refresh", post(auth::refresh))
        .route("/films", get(films::list_films))
        .route("/films/:id", get(films::get_film))
}

/// Endpoints behind the auth gate. Each route carries its own permission layer.
pub fn protected(permissions: &PermissionGate) -> Router {
    let required = |permission: Permission| RequiredPermission {
        gate: permissions.clone(),
        permission,
    };

    Router::new()
        .route("/whoami", get(system::whoami))
        .route(
            "/roles",
            get(system::roles).layer(from_fn_with_state(
                required(Permission::USER_READ),
                require_permission,
            )),
        )
        .route(
            "/staff",
            get(staff::list_staff)
                .layer(from_fn_with_state(
                    required(Permission::STAFF_READ),
                    require_permission,
                ))
                .merge(post(staff::create_staff).layer(from_fn_with_state(
                    required(Permission::STAFF_CREATE),
                    require_permission,
                ))),
        )
        .route(
            "/staff/:username",
            delete(staff::delete_staff).layer(from_fn_with_state(
                required(Permission::STAFF_DELETE),
                require_permission,
            )),
        )
        .route(
            "/films",
            post(films::create_film).layer(from_fn_with_state(
                required(Permission::FILM_CREATE),
                require_permission,
            )),
        )
        .route(
            "/films/:id",
            put(films::update_film)
                .layer(from_fn_with_state(
                    required(Permission::FILM_UPDATE),
                    require_permission,
                ))
                .merge(delete(films::delete_film).layer(from_fn_with_state(
                    required(Permission::FILM_DELETE),
                    require_permission,
                ))),
        )
}
