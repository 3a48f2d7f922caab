//! Catalog service: product CRUD, bulk insert, and the one-shot seed.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{Product, ProductInput, ProductPatch};
use crate::store::{Collection, StorageEngine};

pub struct CatalogService {
    products: Collection<Product>,
}

impl CatalogService {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { products: Collection::new(engine) }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self.products.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<Product> {
        self.products.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Product"))
    }

    pub async fn create(&self, input: ProductInput) -> ServiceResult<Product> {
        input.validate()?;
        let product = input.into_record();
        self.products.insert(&product).await?;
        Ok(product)
    }

    /// Bulk insert; rejects the whole payload if any entry is invalid.
    pub async fn create_many(&self, inputs: Vec<ProductInput>) -> ServiceResult<Vec<Product>> {
        for input in &inputs {
            input.validate()?;
        }
        let records: Vec<Product> = inputs.into_iter().map(ProductInput::into_record).collect();
        self.products.insert_many(&records).await?;
        Ok(records)
    }

    pub async fn update(&self, id: Uuid, patch: ProductPatch) -> ServiceResult<Product> {
        let mut product =
            self.products.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Product"))?;
        patch.apply(&mut product)?;
        self.products.replace(&product).await?;
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.products.delete(id).await? {
            return Err(ServiceError::not_found("Product"));
        }
        Ok(())
    }

    /// Populate an empty catalog with the fixed sample set. Refuses to run
    /// twice: the side effect is irreversible.
    pub async fn seed(&self) -> ServiceResult<Vec<Product>> {
        if !self.products.is_empty().await? {
            return Err(ServiceError::conflict("Products already exist"));
        }
        let records: Vec<Product> =
            sample_products().into_iter().map(ProductInput::into_record).collect();
        self.products.insert_many(&records).await?;
        info!(count = records.len(), "seeded product catalog");
        Ok(records)
    }
}

fn sample_products() -> Vec<ProductInput> {
    let entry = |name: &str, description: &str, price: f64, quantity: u32, image: &str| ProductInput {
        name: name.to_string(),
        description: description.to_string(),
        price,
        quantity,
        category: "Electronics".to_string(),
        image: image.to_string(),
    };

    vec![
        entry("iPhone 16", "Latest iPhone with advanced features", 999.0, 50, "/assets/iphone.jpeg"),
        entry("Apple Watch", "Smart watch with health tracking", 399.0, 30, "/assets/watch.jpeg"),
        entry("AirPods Pro", "Wireless earbuds with noise cancellation", 249.0, 75, "/assets/airpods.jpeg"),
        entry("MacBook Pro", "High-performance laptop for professionals", 1999.0, 20, "/assets/macbook.jpeg"),
        entry("Samsung Galaxy S24", "Android smartphone with excellent camera", 899.0, 40, "/assets/galaxy.jpeg"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryEngine;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryEngine::new()))
    }

    fn input(name: &str, price: f64) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: "hand-poured soy candle".to_string(),
            price,
            quantity: 10,
            category: "Candles".to_string(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let catalog = service();
        let created = catalog.create(input("Cedar & Smoke", 24.5)).await.unwrap();

        let fetched = catalog.get(created.id).await.unwrap();
        assert_eq!(fetched.name, "Cedar & Smoke");
        assert_eq!(fetched.price, 24.5);
        assert_eq!(fetched.quantity, 10);
        assert_eq!(fetched.category, "Candles");
    }

    #[tokio::test]
    async fn test_negative_price_is_rejected() {
        let catalog = service();
        let err = catalog.create(input("Bad", -1.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_seed_refuses_a_populated_catalog() {
        let catalog = service();
        let seeded = catalog.seed().await.unwrap();
        assert_eq!(seeded.len(), 5);

        let err = catalog.seed().await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { .. }));
        assert_eq!(catalog.list().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_update_applies_partial_patch() {
        let catalog = service();
        let created = catalog.create(input("Original", 12.0)).await.unwrap();

        let patch = ProductPatch { price: Some(15.0), ..ProductPatch::default() };
        let updated = catalog.update(created.id, patch).await.unwrap();

        assert_eq!(updated.price, 15.0);
        assert_eq!(updated.name, "Original");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let catalog = service();
        let err = catalog.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_bulk_create_rejects_whole_payload_on_one_bad_entry() {
        let catalog = service();
        let err = catalog
            .create_many(vec![input("Fine", 5.0), input("Broken", -5.0)])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));
        assert!(catalog.list().await.unwrap().is_empty());
    }
}
