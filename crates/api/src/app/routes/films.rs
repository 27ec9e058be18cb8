use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    Json,
};

use crate::app::dto::{Film, FilmRequest};
use crate::app::errors::ApiError;
use crate::app::services::AppServices;

fn film_request(body: Result<Json<FilmRequest>, JsonRejection>) -> Result<FilmRequest, ApiError> {
    let Json(req) = body.map_err(|rej| ApiError::validation(rej.body_text()))?;
    req.validate().map_err(ApiError::Validation)?;
    Ok(req)
}

pub async fn list_films(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Film>>, ApiError> {
    Ok(Json(services.films.list()?))
}

pub async fn get_film(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> Result<Json<Film>, ApiError> {
    services
        .films
        .get(id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("film {id}")))
}

pub async fn create_film(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<FilmRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Film>), ApiError> {
    let req = film_request(body)?;
    let film = services.films.create(req)?;
    tracing::info!(film_id = film.film_id, title = %film.title, "film created");
    Ok((StatusCode::CREATED, Json(film)))
}

pub async fn update_film(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
    body: Result<Json<FilmRequest>, JsonRejection>,
) -> Result<Json<Film>, ApiError> {
    let req = film_request(body)?;
    services
        .films
        .update(id, req)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("film {id}")))
}

pub async fn delete_film(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    if services.films.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("film {id}")))
    }
}
