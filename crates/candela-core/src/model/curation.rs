//! Best-selling curation entries.
//!
//! A [`BestSeller`] is a materialized, point-in-time snapshot of selected
//! product fields plus merchandising metadata. The snapshot is intentionally
//! never re-synced when the source product changes; it lives and dies
//! independently of the product it was copied from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Product;
use crate::store::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestSeller {
    pub id: Uuid,
    /// Source reference, unvalidated after creation.
    pub product_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: String,
    pub sales_count: u64,
    pub discount_percent: f64,
    pub label: String,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for BestSeller {
    const COLLECTION: &'static str = "best_sellers";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurationInput {
    pub product_id: Uuid,
    pub sales_count: u64,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub featured: bool,
}

impl CurationInput {
    /// Snapshot the product's display fields at curation time.
    pub fn into_record(self, product: &Product) -> BestSeller {
        let now = Utc::now();
        BestSeller {
            id: Uuid::new_v4(),
            product_id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            image: product.image.clone(),
            sales_count: self.sales_count,
            discount_percent: self.discount_percent,
            label: self.label,
            featured: self.featured,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BestSellerPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub sales_count: Option<u64>,
    pub discount_percent: Option<f64>,
    pub label: Option<String>,
    pub featured: Option<bool>,
}

impl BestSellerPatch {
    pub fn apply(self, entry: &mut BestSeller) {
        if let Some(name) = self.name {
            entry.name = name;
        }
        if let Some(description) = self.description {
            entry.description = description;
        }
        if let Some(price) = self.price {
            entry.price = price;
        }
        if let Some(category) = self.category {
            entry.category = category;
        }
        if let Some(image) = self.image {
            entry.image = image;
        }
        if let Some(sales_count) = self.sales_count {
            entry.sales_count = sales_count;
        }
        if let Some(discount_percent) = self.discount_percent {
            entry.discount_percent = discount_percent;
        }
        if let Some(label) = self.label {
            entry.label = label;
        }
        if let Some(featured) = self.featured {
            entry.featured = featured;
        }
        entry.updated_at = Utc::now();
    }
}
