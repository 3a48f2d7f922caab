//! Order service, including the batch-checkout duplicate-submission guard.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::model::{BatchCheckout, CheckoutRequest, Order, OrderInput, OrderPatch};
use crate::store::{Collection, StorageEngine};

/// Look-back window for both the idempotency key and the legacy heuristic.
const DUPLICATE_WINDOW_SECS: i64 = 30;

pub struct OrderService {
    orders: Collection<Order>,
    checkout_requests: Collection<CheckoutRequest>,
}

impl OrderService {
    pub fn new(engine: Arc<dyn StorageEngine>) -> Self {
        Self {
            orders: Collection::new(Arc::clone(&engine)),
            checkout_requests: Collection::new(engine),
        }
    }

    pub async fn create(&self, input: OrderInput) -> ServiceResult<Order> {
        input.validate()?;
        let order = input.into_record();
        self.orders.insert(&order).await?;
        Ok(order)
    }

    /// Batch checkout: validate, run the duplicate-submission guard, then
    /// bulk-insert the whole batch as one atomic write (no partial success).
    ///
    /// The guard reads recent state and then writes in two separate store
    /// operations; concurrent submissions from the same user can both land
    /// inside that race window. Nothing transactional backs the check.
    pub async fn create_batch(&self, batch: BatchCheckout) -> ServiceResult<Vec<Order>> {
        if batch.orders.is_empty() {
            return Err(ServiceError::bad_request("Orders array is required and cannot be empty"));
        }
        for input in &batch.orders {
            input.validate()?;
        }

        let cutoff = Utc::now() - Duration::seconds(DUPLICATE_WINDOW_SECS);
        let user_id = batch.orders[0].user_id;

        if let Some(request_id) = &batch.request_id {
            // Records past the horizon are dead weight; drop them on the
            // way through so the collection tracks the window.
            for stale in
                self.checkout_requests.find_where(|r| r.created_at < cutoff).await?
            {
                self.checkout_requests.delete(stale.id).await?;
            }

            // Idempotency key path: a repeated client request id inside the
            // window rejects the batch outright, match or no match.
            let seen = self
                .checkout_requests
                .find_where(|r| r.request_id == *request_id && r.created_at >= cutoff)
                .await?;
            if !seen.is_empty() {
                warn!(%request_id, "rejected replayed checkout request");
                return Err(ServiceError::conflict(
                    "This checkout was already submitted. Please wait before trying again.",
                ));
            }
            self.checkout_requests
                .insert(&CheckoutRequest::new(request_id.clone(), user_id))
                .await?;
        } else if let Some(user_id) = user_id {
            // Legacy heuristic: compares cardinalities, not a one-to-one
            // match, so it can both under- and over-trigger. The request_id
            // path above is the supported replacement.
            let recent = self
                .orders
                .find_where(|o| o.user_id == Some(user_id) && o.created_at >= cutoff)
                .await?;

            let has_similar = recent.iter().any(|recent_order| {
                batch.orders.iter().any(|incoming| {
                    incoming.product == recent_order.product
                        && incoming.quantity == recent_order.quantity
                        && incoming.price == recent_order.price
                })
            });

            if has_similar && recent.len() >= batch.orders.len() {
                warn!(%user_id, recent = recent.len(), "rejected likely duplicate batch checkout");
                return Err(ServiceError::conflict(
                    "Similar orders were recently placed. Please wait a few minutes before placing the same order again.",
                ));
            }
        }

        let records: Vec<Order> =
            batch.orders.into_iter().map(OrderInput::into_record).collect();
        self.orders.insert_many(&records).await?;
        info!(count = records.len(), "created order batch");
        Ok(records)
    }

    pub async fn list(&self) -> ServiceResult<Vec<Order>> {
        Ok(self.orders.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> ServiceResult<Order> {
        self.orders.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Order"))
    }

    pub async fn update(&self, id: Uuid, patch: OrderPatch) -> ServiceResult<Order> {
        let mut order =
            self.orders.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Order"))?;
        patch.apply(&mut order)?;
        self.orders.replace(&order).await?;
        Ok(order)
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        if !self.orders.delete(id).await? {
            return Err(ServiceError::not_found("Order"));
        }
        Ok(())
    }
}
