use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filmrental_auth::{CredentialRecord, Permission, Role};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Clone, Deserialize)]
pub struct CreateStaffRequest {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl core::fmt::Debug for CreateStaffRequest {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreateStaffRequest")
            .field("username", &self.username)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilmRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_year: Option<i32>,
    #[serde(default = "default_rental_duration")]
    pub rental_duration: u16,
    #[serde(default = "default_rental_rate")]
    pub rental_rate: f32,
    pub length: Option<u16>,
    #[serde(default = "default_replacement_cost")]
    pub replacement_cost: f32,
    #[serde(default = "default_rating")]
    pub rating: String,
    #[serde(default = "default_language_id")]
    pub language_id: u32,
}

fn default_rental_duration() -> u16 {
    3
}

fn default_rental_rate() -> f32 {
    4.99
}

fn default_replacement_cost() -> f32 {
    19.99
}

fn default_rating() -> String {
    "G".to_string()
}

fn default_language_id() -> u32 {
    1
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StaffResponse {
    pub username: String,
    pub role: Role,
}

impl From<CredentialRecord> for StaffResponse {
    fn from(record: CredentialRecord) -> Self {
        Self {
            username: record.username,
            role: record.role,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WhoAmIResponse {
    pub username: String,
    pub role: Role,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Film {
    pub film_id: u64,
    pub title: String,
    pub description: String,
    pub release_year: Option<i32>,
    pub rental_duration: u16,
    pub rental_rate: f32,
    pub length: Option<u16>,
    pub replacement_cost: f32,
    pub rating: String,
    pub language_id: u32,
    pub last_update: DateTime<Utc>,
}

impl Film {
    pub fn from_request(film_id: u64, req: FilmRequest, now: DateTime<Utc>) -> Self {
        Self {
            film_id,
            title: req.title,
            description: req.description,
            release_year: req.release_year,
            rental_duration: req.rental_duration,
            rental_rate: req.rental_rate,
            length: req.length,
            replacement_cost: req.replacement_cost,
            rating: req.rating,
            language_id: req.language_id,
            last_update: now,
        }
    }
}

/// MPAA ratings accepted for films.
pub const FILM_RATINGS: [&str; 5] = ["G", "PG", "PG-13", "R", "NC-17"];

impl FilmRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        if self.title.chars().count() > 255 {
            return Err("title must be at most 255 characters".to_string());
        }
        if !FILM_RATINGS.contains(&self.rating.as_str()) {
            return Err(format!("rating must be one of: {}", FILM_RATINGS.join(", ")));
        }
        if self.rental_duration == 0 {
            return Err("rental_duration must be greater than zero".to_string());
        }
        if !(self.rental_rate >= 0.0 && self.replacement_cost >= 0.0) {
            return Err("prices must not be negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn film(body: serde_json::Value) -> FilmRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn film_defaults_fill_missing_fields() {
        let req = film(json!({ "title": "ACADEMY DINOSAUR" }));
        assert_eq!(req.rating, "G");
        assert_eq!(req.rental_duration, 3);
        assert_eq!(req.language_id, 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn film_validation_rejects_bad_input() {
        assert!(film(json!({ "title": "  " })).validate().is_err());
        assert!(film(json!({ "title": "X", "rating": "XXX" })).validate().is_err());
        assert!(film(json!({ "title": "X", "rental_duration": 0 })).validate().is_err());
        assert!(film(json!({ "title": "X", "rental_rate": -1.0 })).validate().is_err());
    }

    #[test]
    fn staff_request_debug_hides_password() {
        let req: CreateStaffRequest = serde_json::from_value(json!({
            "username": "mike",
            "password": "hunter22",
            "role": "user",
        }))
        .unwrap();
        assert!(!format!("{req:?}").contains("hunter22"));
    }
}
