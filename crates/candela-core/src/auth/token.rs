//! Opaque session token generation.

use chrono::Duration;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

pub const TOKEN_LENGTH: usize = 48;

const SESSION_TTL_HOURS: i64 = 24;

/// Generate a random alphanumeric bearer token.
pub fn generate_token() -> String {
    thread_rng().sample_iter(&Alphanumeric).take(TOKEN_LENGTH).map(char::from).collect()
}

/// How long an issued session stays valid.
pub fn session_ttl() -> Duration {
    Duration::hours(SESSION_TTL_HOURS)
}
