//! Blog content records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::store::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: String,
    pub image_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Blog {
    const COLLECTION: &'static str = "blogs";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlogInput {
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_published")]
    pub is_published: bool,
}

fn default_category() -> String {
    "General".to_string()
}

fn default_published() -> bool {
    true
}

impl BlogInput {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::validation("Blog title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(ServiceError::validation("Blog content is required"));
        }
        if self.author.trim().is_empty() {
            return Err(ServiceError::validation("Blog author is required"));
        }
        Ok(())
    }

    pub fn into_record(self) -> Blog {
        let now = Utc::now();
        Blog {
            id: Uuid::new_v4(),
            title: self.title.trim().to_string(),
            content: self.content,
            author: self.author.trim().to_string(),
            image_url: self.image_url,
            category: self.category,
            tags: self.tags,
            is_published: self.is_published,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_published: Option<bool>,
}

impl BlogPatch {
    pub fn apply(self, blog: &mut Blog) -> ServiceResult<()> {
        if let Some(title) = self.title {
            blog.title = title;
        }
        if let Some(content) = self.content {
            blog.content = content;
        }
        if let Some(author) = self.author {
            blog.author = author;
        }
        if let Some(image_url) = self.image_url {
            blog.image_url = image_url;
        }
        if let Some(category) = self.category {
            blog.category = category;
        }
        if let Some(tags) = self.tags {
            blog.tags = tags;
        }
        if let Some(is_published) = self.is_published {
            blog.is_published = is_published;
        }
        if blog.title.trim().is_empty() || blog.content.trim().is_empty() || blog.author.trim().is_empty() {
            return Err(ServiceError::validation("Blog title, content, and author are required"));
        }
        blog.updated_at = Utc::now();
        Ok(())
    }
}
