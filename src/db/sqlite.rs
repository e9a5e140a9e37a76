use crate::db::models::{DbPost, format_timestamp};
use crate::db::schema::SQLITE_INIT;
use crate::error::CmsError;
use crate::types::{Post, PostDraft, PostId};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

const POST_COLUMNS: &str = "id, title, excerpt, content, category, read_time, image, \
                            is_featured, created_at, updated_at";

/// Open a pool for `database_url`, creating the file if needed.
/// In-memory databases are pinned to a single long-lived connection so every
/// caller sees the same data.
pub async fn connect(database_url: &str) -> Result<SqlitePool, CmsError> {
    let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_opts = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };
    Ok(pool_opts.connect_with(opts).await?)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), CmsError> {
    // sqlx::query runs one statement at a time
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct PostStorage {
    pool: SqlitePool,
}

impl PostStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new post; `created_at` and `updated_at` are both set to now.
    pub async fn insert(&self, draft: &PostDraft) -> Result<Post, CmsError> {
        let now = format_timestamp(Utc::now());
        let tags = draft.tags.to_column()?;
        let row: DbPost = sqlx::query_as(&format!(
            r#"INSERT INTO posts (
                title, excerpt, content, category, read_time, image,
                is_featured, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {POST_COLUMNS}"#
        ))
        .bind(&draft.title)
        .bind(&draft.excerpt)
        .bind(&draft.content)
        .bind(tags)
        .bind(&draft.read_time)
        .bind(&draft.image)
        .bind(draft.is_featured)
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_into()?)
    }

    pub async fn get_by_id(&self, id: PostId) -> Result<Option<Post>, CmsError> {
        let row: Option<DbPost> =
            sqlx::query_as(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Post::try_from).transpose()?)
    }

    /// Overwrite every mutable column of `id`. Returns `None` if no such row.
    pub async fn replace(&self, id: PostId, draft: &PostDraft) -> Result<Option<Post>, CmsError> {
        let now = format_timestamp(Utc::now());
        let tags = draft.tags.to_column()?;
        let row: Option<DbPost> = sqlx::query_as(&format!(
            r#"UPDATE posts SET
                title = ?,
                excerpt = ?,
                content = ?,
                category = ?,
                read_time = ?,
                image = ?,
                is_featured = ?,
                updated_at = ?
              WHERE id = ?
              RETURNING {POST_COLUMNS}"#
        ))
        .bind(&draft.title)
        .bind(&draft.excerpt)
        .bind(&draft.content)
        .bind(tags)
        .bind(&draft.read_time)
        .bind(&draft.image)
        .bind(draft.is_featured)
        .bind(&now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Post::try_from).transpose()?)
    }

    /// Returns whether a row was removed.
    pub async fn delete(&self, id: PostId) -> Result<bool, CmsError> {
        let res = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    /// Featured first, then newest first; id breaks timestamp ties.
    pub async fn list(&self) -> Result<Vec<Post>, CmsError> {
        let rows: Vec<DbPost> = sqlx::query_as(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY is_featured DESC, created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter()
            .map(|r| Post::try_from(r).map_err(CmsError::from))
            .collect()
    }
}
