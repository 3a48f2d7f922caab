//! Media upload forwarding.
//!
//! The API never stores image bytes itself: `POST /api/upload` hands the
//! file to an external hosting provider and returns the public URL the
//! provider reports. An unconfigured client fails fast with a clear error.

use candela_core::{ServiceError, ServiceResult};
use tracing::debug;

use crate::config::MediaConfig;

pub struct MediaClient {
    http: reqwest::Client,
    upload_url: Option<String>,
    api_key: Option<String>,
}

impl MediaClient {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_url: config.upload_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Client with no provider configured; every upload attempt fails.
    pub fn unconfigured() -> Self {
        Self::new(&MediaConfig::default())
    }

    /// Forward one image to the provider and return its public URL.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: Option<String>,
        content_type: Option<String>,
    ) -> ServiceResult<String> {
        let url = self
            .upload_url
            .as_deref()
            .ok_or_else(|| ServiceError::internal("media hosting is not configured"))?;

        let mut part = reqwest::multipart::Part::bytes(bytes);
        if let Some(name) = file_name {
            part = part.file_name(name);
        }
        if let Some(mime) = content_type {
            part = part
                .mime_str(&mime)
                .map_err(|_| ServiceError::bad_request("Unsupported image content type"))?;
        }

        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(key) = &self.api_key {
            form = form.text("api_key", key.clone());
        }

        debug!(%url, "forwarding image to media provider");
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ServiceError::internal(format!("media upload failed: {}", err)))?;

        if !response.status().is_success() {
            return Err(ServiceError::internal(format!(
                "media provider rejected the upload with status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|err| ServiceError::internal(format!("invalid media provider response: {}", err)))?;

        // Providers differ on the field name; Cloudinary uses secure_url.
        body.get("secure_url")
            .or_else(|| body.get("url"))
            .and_then(|value| value.as_str())
            .map(str::to_string)
            .ok_or_else(|| ServiceError::internal("media provider response carried no URL"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_client_fails_fast() {
        let client = MediaClient::unconfigured();
        let err = client.upload(vec![1, 2, 3], None, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Internal { .. }));
        assert!(err.to_string().contains("not configured"));
    }
}
