//! Persisted record types and their input/patch forms.
//!
//! Relationships between records are unvalidated identifier copies, not
//! enforced foreign keys: an order may reference a deleted user, and a
//! best-seller snapshot may drift from its source product.

mod blog;
mod curation;
mod order;
mod product;
mod session;
mod user;

pub use blog::{Blog, BlogInput, BlogPatch};
pub use curation::{BestSeller, BestSellerPatch, CurationInput};
pub use order::{BatchCheckout, CheckoutRequest, Order, OrderInput, OrderPatch, OrderStatus};
pub use product::{Product, ProductInput, ProductPatch};
pub use session::Session;
pub use user::{PublicUser, RegisterInput, Role, User, UserPatch};
