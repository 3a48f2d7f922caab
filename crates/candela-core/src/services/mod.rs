//! Storefront services.
//!
//! Each service owns typed collections over the shared storage engine. A
//! request handler performs one service call; the service's sequence of
//! store operations is effectively serial within that call, with no locking
//! across calls (the batch-checkout guard's read-then-write race window is
//! documented on [`OrderService::create_batch`]).

mod accounts;
mod catalog;
mod content;
mod curation;
mod orders;

use std::sync::Arc;

pub use accounts::AccountService;
pub use catalog::CatalogService;
pub use content::ContentService;
pub use curation::CurationService;
pub use orders::OrderService;

use crate::auth::PasswordHasher;
use crate::store::StorageEngine;

/// Everything the HTTP layer needs, built over one engine.
pub struct Services {
    pub catalog: CatalogService,
    pub curation: CurationService,
    pub orders: OrderService,
    pub accounts: AccountService,
    pub content: ContentService,
}

impl Services {
    pub fn new(engine: Arc<dyn StorageEngine>, hasher: PasswordHasher) -> Self {
        Self {
            catalog: CatalogService::new(Arc::clone(&engine)),
            curation: CurationService::new(Arc::clone(&engine)),
            orders: OrderService::new(Arc::clone(&engine)),
            accounts: AccountService::new(Arc::clone(&engine), hasher),
            content: ContentService::new(engine),
        }
    }
}
