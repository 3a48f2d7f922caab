//! Auth sessions: opaque bearer tokens issued at login and verified by the
//! server's admin extractor. Tokens are server-side records, so revoking a
//! session is a plain delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::Document;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl Document for Session {
    const COLLECTION: &'static str = "sessions";

    fn id(&self) -> Uuid {
        self.id
    }
}
