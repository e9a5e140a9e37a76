use crate::types::{Post, Tags};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;

/// Raw `posts` row; tags and timestamps still in their column encodings.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbPost {
    pub id: i64,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub category: String,
    pub read_time: Option<String>,
    pub image: Option<String>,
    pub is_featured: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<DbPost> for Post {
    type Error = sqlx::Error;

    fn try_from(row: DbPost) -> Result<Self, Self::Error> {
        let tags = Tags::from_column(&row.category).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Post {
            id: row.id,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            tags,
            read_time: row.read_time,
            image: row.image,
            is_featured: row.is_featured,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Fixed-width RFC3339 so that text ordering equals chronological ordering.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
