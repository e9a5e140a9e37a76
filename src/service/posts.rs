use crate::db::PostStorage;
use crate::error::CmsError;
use crate::types::{Post, PostFields, PostId};
use tracing::{debug, info};

/// Validated CRUD over blog posts.
#[derive(Clone)]
pub struct PostRepository {
    storage: PostStorage,
}

impl PostRepository {
    pub fn new(storage: PostStorage) -> Self {
        Self { storage }
    }

    pub async fn create(&self, fields: PostFields) -> Result<Post, CmsError> {
        let draft = fields.validate()?;
        let post = self.storage.insert(&draft).await?;
        info!(id = post.id, title = %post.title, featured = post.is_featured, "post created");
        Ok(post)
    }

    pub async fn get_by_id(&self, id: PostId) -> Result<Post, CmsError> {
        self.storage
            .get_by_id(id)
            .await?
            .ok_or(CmsError::NotFound("Post"))
    }

    /// Path ids that are not integers cannot name a post, so they are reported
    /// as not found rather than as a malformed request.
    pub async fn get_by_raw_id(&self, raw: &str) -> Result<Post, CmsError> {
        self.get_by_id(parse_post_id(raw)?).await
    }

    /// Full replacement: every mutable field is overwritten from `fields`.
    pub async fn update(&self, id: PostId, fields: PostFields) -> Result<Post, CmsError> {
        let draft = fields.validate()?;
        let post = self
            .storage
            .replace(id, &draft)
            .await?
            .ok_or(CmsError::NotFound("Post"))?;
        info!(id, "post updated");
        Ok(post)
    }

    pub async fn delete(&self, id: PostId) -> Result<(), CmsError> {
        if !self.storage.delete(id).await? {
            return Err(CmsError::NotFound("Post"));
        }
        info!(id, "post deleted");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Post>, CmsError> {
        let posts = self.storage.list().await?;
        debug!(count = posts.len(), "posts listed");
        Ok(posts)
    }
}

pub fn parse_post_id(raw: &str) -> Result<PostId, CmsError> {
    raw.trim()
        .parse::<PostId>()
        .map_err(|_| CmsError::NotFound("Post"))
}
