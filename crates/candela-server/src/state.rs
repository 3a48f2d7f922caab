//! Shared request state.

use std::sync::Arc;

use candela_core::services::Services;

use crate::media::MediaClient;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub media: Arc<MediaClient>,
}

impl AppState {
    pub fn new(services: Arc<Services>, media: Arc<MediaClient>) -> Self {
        Self { services, media }
    }
}
