use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tags::{CategoryInput, Tags};
use crate::error::CmsError;

pub type PostId = i64;

/// A stored blog post as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub tags: Tags,
    pub read_time: Option<String>,
    pub image: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and update. Update is a full replacement: every
/// field not present here is cleared on the stored post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostFields {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    #[serde(alias = "tags")]
    pub category: Option<CategoryInput>,
    pub read_time: Option<String>,
    pub image: Option<String>,
    pub is_featured: Option<bool>,
}

/// Post fields after validation, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub tags: Tags,
    pub read_time: Option<String>,
    pub image: Option<String>,
    pub is_featured: bool,
}

impl PostFields {
    pub fn validate(self) -> Result<PostDraft, CmsError> {
        let title = required(self.title, "title")?;
        let content = required(self.content, "content")?;
        let tags: Tags = self.category.map(Tags::from).unwrap_or_default();
        if tags.is_empty() {
            return Err(CmsError::validation("category is required"));
        }
        Ok(PostDraft {
            title,
            excerpt: optional(self.excerpt),
            content,
            tags,
            read_time: optional(self.read_time),
            image: optional(self.image),
            is_featured: self.is_featured.unwrap_or(false),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, CmsError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CmsError::validation(format!("{field} is required"))),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
