//! Postgres-backed credential store over the `staff` table.
//!
//! Expects `staff(username TEXT UNIQUE, password TEXT, role TEXT)`; schema
//! management lives outside this crate.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use filmrental_auth::{CredentialRecord, CredentialStore, Role, StoreError};

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;
        Ok(Self::new(pool))
    }
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<CredentialRecord, StoreError> {
    let field = |e: sqlx::Error| StoreError::backend(e.to_string());
    Ok(CredentialRecord {
        username: row.try_get("username").map_err(field)?,
        password_hash: row.try_get("password").map_err(field)?,
        role: Role::from(row.try_get::<String, _>("role").map_err(field)?),
    })
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT username, password, role
            FROM staff
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "staff lookup failed");
            StoreError::backend(e.to_string())
        })?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn create(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO staff (username, password, role, last_update)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(&record.username)
        .bind(&record.password_hash)
        .bind(record.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::backend(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(record.username));
        }
        Ok(())
    }

    async fn delete(&self, username: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM staff WHERE username = $1")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        let rows = sqlx::query("SELECT username, password, role FROM staff ORDER BY username")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::backend(e.to_string()))?;

        rows.iter().map(row_to_record).collect()
    }
}
