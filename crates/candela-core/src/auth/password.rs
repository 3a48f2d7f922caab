//! bcrypt password hashing.

use crate::error::ServiceResult;

/// Adaptive password hasher with a configurable cost factor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

/// Cost factor used in production.
const PRODUCTION_COST: u32 = 10;

impl PasswordHasher {
    /// Create a hasher with a custom cost
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Create a hasher optimized for tests (fast, weak)
    pub fn development() -> Self {
        Self { cost: 4 }
    }

    pub fn hash(&self, password: &str) -> ServiceResult<String> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    pub fn verify(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        Ok(bcrypt::verify(password, hash)?)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(PRODUCTION_COST)
    }
}
