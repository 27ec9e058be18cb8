//! In-memory film catalog backing the `/films` routes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::Utc;
use thiserror::Error;

use crate::app::dto::{Film, FilmRequest};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("film catalog lock poisoned")]
pub struct CatalogError;

#[derive(Debug, Default)]
pub struct FilmCatalog {
    films: RwLock<BTreeMap<u64, Film>>,
    next_id: AtomicU64,
}

impl FilmCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Result<Vec<Film>, CatalogError> {
        let films = self.films.read().map_err(|_| CatalogError)?;
        Ok(films.values().cloned().collect())
    }

    pub fn get(&self, id: u64) -> Result<Option<Film>, CatalogError> {
        let films = self.films.read().map_err(|_| CatalogError)?;
        Ok(films.get(&id).cloned())
    }

    pub fn create(&self, req: FilmRequest) -> Result<Film, CatalogError> {
        let mut films = self.films.write().map_err(|_| CatalogError)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let film = Film::from_request(id, req, Utc::now());
        films.insert(id, film.clone());
        Ok(film)
    }

    /// Replaces an existing film; `Ok(None)` when the id is unknown.
    pub fn update(&self, id: u64, req: FilmRequest) -> Result<Option<Film>, CatalogError> {
        let mut films = self.films.write().map_err(|_| CatalogError)?;
        let Some(slot) = films.get_mut(&id) else {
            return Ok(None);
        };
        *slot = Film::from_request(id, req, Utc::now());
        Ok(Some(slot.clone()))
    }

    pub fn delete(&self, id: u64) -> Result<bool, CatalogError> {
        let mut films = self.films.write().map_err(|_| CatalogError)?;
        Ok(films.remove(&id).is_some())
    }
}
