//! Blog content service.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{Blog, BlogInput, BlogPatch};
use crate::store::{Collection, StorageEngine};

pub struct ContentService {
    blogs: Collection<Blog>,
}

impl ContentService {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { blogs: Collection::new(engine) }
    }

    /// Published posts only, newest first. Drafts stay invisible to the
    /// public listing but remain reachable by id.
    pub async fn list_published(&self) -> ServiceResult<Vec<Blog>> {
        let mut blogs = self.blogs.find_where(|b| b.is_published).await?;
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blogs)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<Blog> {
        self.blogs.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Blog"))
    }

    pub async fn create(&self, input: BlogInput) -> ServiceResult<Blog> {
        input.validate()?;
        let blog = input.into_record();
        self.blogs.insert(&blog).await?;
        Ok(blog)
    }

    pub async fn update(&self, id: Uuid, patch: BlogPatch) -> ServiceResult<Blog> {
        let mut blog =
            self.blogs.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Blog"))?;
        patch.apply(&mut blog)?;
        self.blogs.replace(&blog).await?;
        Ok(blog)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.blogs.delete(id).await? {
            return Err(ServiceError::not_found("Blog"));
        }
        Ok(())
    }
}
