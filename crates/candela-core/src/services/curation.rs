//! Best-selling curation service.
//!
//! Entries are point-in-time snapshots of product display fields; they are
//! never re-synced when the source product changes (see the model docs for
//! the staleness contract).

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{BestSeller, BestSellerPatch, CurationInput, Product};
use crate::store::{Collection, StorageEngine};

pub struct CurationService {
    entries: Collection<BestSeller>,
    products: Collection<Product>,
}

impl CurationService {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self { entries: Collection::new(Arc::clone(&engine)), products: Collection::new(engine) }
    }

    pub async fn list(&self) -> ServiceResult<Vec<BestSeller>> {
        Ok(self.entries.find_all().await?)
    }

    /// Featured entries, highest sales count first, truncated to `limit`.
    pub async fn list_featured(&self, limit: usize) -> ServiceResult<Vec<BestSeller>> {
        let mut featured = self.entries.find_where(|e| e.featured).await?;
        featured.sort_by(|a, b| b.sales_count.cmp(&a.sales_count));
        featured.truncate(limit);
        Ok(featured)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<BestSeller> {
        self.entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Best-selling entry"))
    }

    /// Curate a product. At most one entry may reference a given product;
    /// the conflict message carries the existing entry's sales count so the
    /// caller can decide to edit instead of re-add.
    pub async fn create(&self, input: CurationInput) -> ServiceResult<BestSeller> {
        let product = self
            .products
            .find_by_id(input.product_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product"))?;

        let existing = self.entries.find_where(|e| e.product_id == input.product_id).await?;
        if let Some(entry) = existing.first() {
            return Err(ServiceError::conflict(format!(
                "This product is already in the best-selling list with {} sales. Edit the existing entry instead of adding it again.",
                entry.sales_count
            )));
        }

        let entry = input.into_record(&product);
        self.entries.insert(&entry).await?;
        Ok(entry)
    }

    pub async fn update(&self, id: Uuid, patch: BestSellerPatch) -> ServiceResult<BestSeller> {
        let mut entry = self
            .entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Best-selling entry"))?;
        patch.apply(&mut entry);
        self.entries.replace(&entry).await?;
        Ok(entry)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.entries.delete(id).await? {
            return Err(ServiceError::not_found("Best-selling entry"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductInput;
    use crate::services::CatalogService;
    use crate::store::{MemoryEngine, StorageEngine};

    fn setup() -> (CatalogService, CurationService) {
        let engine: Arc<dyn StorageEngine> = Arc::new(MemoryEngine::new());
        (CatalogService::new(Arc::clone(&engine)), CurationService::new(engine))
    }

    async fn seeded_product(catalog: &CatalogService, name: &str) -> Product {
        catalog
            .create(ProductInput {
                name: name.to_string(),
                description: "desc".to_string(),
                price: 19.0,
                quantity: 5,
                category: "Candles".to_string(),
                image: "/img.jpeg".to_string(),
            })
            .await
            .unwrap()
    }

    fn curation(product_id: Uuid, sales_count: u64, featured: bool) -> CurationInput {
        CurationInput {
            product_id,
            sales_count,
            discount_percent: 10.0,
            label: "Hot".to_string(),
            featured,
        }
    }

    #[tokio::test]
    async fn test_create_snapshots_product_fields() {
        let (catalog, entries) = setup();
        let product = seeded_product(&catalog, "Amber Glow").await;

        let entry = entries.create(curation(product.id, 120, true)).await.unwrap();
        assert_eq!(entry.name, "Amber Glow");
        assert_eq!(entry.price, 19.0);
        assert_eq!(entry.product_id, product.id);

        // Snapshot does not follow later product edits.
        let patch = crate::model::ProductPatch {
            price: Some(25.0),
            ..crate::model::ProductPatch::default()
        };
        catalog.update(product.id, patch).await.unwrap();
        assert_eq!(entries.get(entry.id).await.unwrap().price, 19.0);
    }

    #[tokio::test]
    async fn test_duplicate_curation_conflicts_with_sales_count_in_message() {
        let (catalog, entries) = setup();
        let product = seeded_product(&catalog, "Amber Glow").await;

        entries.create(curation(product.id, 120, true)).await.unwrap();
        let err = entries.create(curation(product.id, 999, false)).await.unwrap_err();

        match err {
            ServiceError::Conflict { message } => assert!(message.contains("120")),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_curating_a_missing_product_is_not_found() {
        let (_catalog, entries) = setup();
        let err = entries.create(curation(Uuid::new_v4(), 1, false)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_featured_listing_sorts_and_truncates() {
        let (catalog, entries) = setup();
        for (name, sales, featured) in
            [("A", 10, true), ("B", 50, true), ("C", 30, true), ("D", 99, false)]
        {
            let product = seeded_product(&catalog, name).await;
            entries.create(curation(product.id, sales, featured)).await.unwrap();
        }

        let featured = entries.list_featured(2).await.unwrap();
        assert_eq!(featured.len(), 2);
        assert_eq!(featured[0].name, "B");
        assert_eq!(featured[1].name, "C");
    }

    #[tokio::test]
    async fn test_entry_outlives_its_source_product() {
        let (catalog, entries) = setup();
        let product = seeded_product(&catalog, "Amber Glow").await;
        let entry = entries.create(curation(product.id, 5, true)).await.unwrap();

        catalog.delete(product.id).await.unwrap();
        assert_eq!(entries.get(entry.id).await.unwrap().name, "Amber Glow");
    }
}
