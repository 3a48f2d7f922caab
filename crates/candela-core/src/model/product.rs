//! Catalog product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::store::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Product {
    const COLLECTION: &'static str = "products";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// Payload for creating a product (single or bulk).
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub image: String,
}

fn default_category() -> String {
    "Electronics".to_string()
}

impl ProductInput {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::validation("Product name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(ServiceError::validation("Product description is required"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ServiceError::validation("Product price must be a non-negative number"));
        }
        Ok(())
    }

    pub fn into_record(self) -> Product {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            category: self.category,
            image: self.image,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial overwrite for `PUT /api/products/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    pub category: Option<String>,
    pub image: Option<String>,
}

impl ProductPatch {
    pub fn apply(self, product: &mut Product) -> ServiceResult<()> {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if product.name.trim().is_empty() {
            return Err(ServiceError::validation("Product name is required"));
        }
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(ServiceError::validation("Product price must be a non-negative number"));
        }
        product.updated_at = Utc::now();
        Ok(())
    }
}
