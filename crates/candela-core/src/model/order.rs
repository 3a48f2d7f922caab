//! Order records and the batch-checkout payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::store::Document;

/// Declared statuses. No transition table is enforced; any value is
/// settable through an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Free-text product name, not a foreign key into the catalog.
    pub product: String,
    pub quantity: u32,
    pub price: f64,
    pub status: OrderStatus,
    pub image: String,
    /// Soft reference; the user may have been deleted since.
    pub user_id: Option<Uuid>,
    pub user_name: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document for Order {
    const COLLECTION: &'static str = "orders";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderInput {
    pub product: String,
    pub quantity: u32,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
}

fn default_user_name() -> String {
    "Guest".to_string()
}

impl OrderInput {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.product.trim().is_empty() || self.quantity == 0 || !self.price.is_finite() {
            return Err(ServiceError::bad_request(
                "Each order must have product, quantity, and price",
            ));
        }
        if self.price < 0.0 {
            return Err(ServiceError::validation("Order price must be a non-negative number"));
        }
        Ok(())
    }

    pub fn into_record(self) -> Order {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4(),
            product: self.product,
            quantity: self.quantity,
            price: self.price,
            status: OrderStatus::Pending,
            image: self.image,
            user_id: self.user_id,
            user_name: self.user_name,
            user_email: self.user_email,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /api/orders/batch`.
///
/// `request_id` is a client-generated idempotency key; when present it takes
/// precedence over the legacy field-matching duplicate heuristic.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchCheckout {
    pub orders: Vec<OrderInput>,
    #[serde(default)]
    pub request_id: Option<String>,
}

/// Accepted checkout request ids, kept for the duplicate-guard window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub id: Uuid,
    pub request_id: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl CheckoutRequest {
    pub fn new(request_id: String, user_id: Option<Uuid>) -> Self {
        Self { id: Uuid::new_v4(), request_id, user_id, created_at: Utc::now() }
    }
}

impl Document for CheckoutRequest {
    const COLLECTION: &'static str = "checkout_requests";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPatch {
    pub product: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
    pub status: Option<OrderStatus>,
    pub image: Option<String>,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
}

impl OrderPatch {
    pub fn apply(self, order: &mut Order) -> ServiceResult<()> {
        if let Some(product) = self.product {
            order.product = product;
        }
        if let Some(quantity) = self.quantity {
            order.quantity = quantity;
        }
        if let Some(price) = self.price {
            order.price = price;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        if let Some(image) = self.image {
            order.image = image;
        }
        if let Some(user_name) = self.user_name {
            order.user_name = user_name;
        }
        if let Some(user_email) = self.user_email {
            order.user_email = user_email;
        }
        if order.product.trim().is_empty() || order.quantity == 0 {
            return Err(ServiceError::validation("Order must keep a product and a quantity of at least 1"));
        }
        if !order.price.is_finite() || order.price < 0.0 {
            return Err(ServiceError::validation("Order price must be a non-negative number"));
        }
        order.updated_at = Utc::now();
        Ok(())
    }
}
