//! Password hashing and session token generation.

mod password;
mod token;

pub use password::PasswordHasher;
pub use token::{generate_token, session_ttl, TOKEN_LENGTH};
