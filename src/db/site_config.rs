use crate::db::models::format_timestamp;
use crate::db::sqlite::SqlitePool;
use crate::error::CmsError;
use chrono::Utc;

/// Keyed settings store over the `site_config` table.
#[derive(Clone)]
pub struct SiteConfigStorage {
    pool: SqlitePool,
}

impl SiteConfigStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, CmsError> {
        let rec: Option<(String,)> = sqlx::query_as("SELECT value FROM site_config WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(rec.map(|r| r.0))
    }

    /// Insert `value` under `key` unless the key already exists, then return
    /// whatever is stored. Uses `INSERT ... ON CONFLICT(key) DO NOTHING`, so
    /// concurrent first reads converge on one row.
    pub async fn get_or_insert(&self, key: &str, value: &str) -> Result<String, CmsError> {
        sqlx::query(
            r#"INSERT INTO site_config (key, value, updated_at) VALUES (?, ?, ?)
               ON CONFLICT(key) DO NOTHING"#,
        )
        .bind(key)
        .bind(value)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;

        let rec: (String,) = sqlx::query_as("SELECT value FROM site_config WHERE key = ?")
            .bind(key)
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    /// Upsert by unique key.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), CmsError> {
        sqlx::query(
            r#"INSERT INTO site_config (key, value, updated_at) VALUES (?, ?, ?)
               ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn count_rows(&self, key: &str) -> Result<i64, CmsError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM site_config WHERE key = ?")
            .bind(key)
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }
}
